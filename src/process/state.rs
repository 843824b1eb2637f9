/*!
 * Process State Machine
 *
 * Allowed transitions:
 *
 * ```text
 * WAITING_MEMORY --grant--> READY --dispatch--> RUNNING --finish--> TERMINATED
 *                             ^   \                |
 *                             |    `---io----.     | io
 *                             |               v    v
 *                             `----io done--- BLOCKED
 * ```
 */

use super::types::ProcessState;

impl ProcessState {
    /// Whether the lifecycle permits moving from `self` to `next`
    pub fn can_transition_to(self, next: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, next),
            (WaitingMemory, Ready)
                | (Ready, Running)
                | (Ready, Blocked)
                | (Running, Terminated)
                | (Running, Blocked)
                | (Blocked, Ready)
        )
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == ProcessState::Terminated
    }
}
