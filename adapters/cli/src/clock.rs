use std::time::Duration;

use platformer_rendering::FrameInput;
use platformer_system_flow::FlowInput;

/// Longest render frame the clock catches up on; anything longer is dropped.
const MAX_ELAPSED: Duration = Duration::from_millis(250);

/// Fixed-rate clock turning variable render frames into simulation frames.
///
/// Presses are latched until the next simulation frame runs so that a press
/// landing on a render frame without a due simulation frame is not lost.
#[derive(Debug)]
pub(crate) struct FrameClock {
    step: Duration,
    accumulator: Duration,
    latched: FlowInput,
}

impl FrameClock {
    pub(crate) fn new(frame_rate: i32) -> Self {
        Self {
            step: Duration::from_nanos(1_000_000_000 / u64::from(frame_rate.max(1).unsigned_abs())),
            accumulator: Duration::ZERO,
            latched: FlowInput::default(),
        }
    }

    /// Returns the input of every simulation frame due after `elapsed`.
    pub(crate) fn advance(&mut self, elapsed: Duration, input: FrameInput) -> Vec<FlowInput> {
        self.latched.confirm |= input.confirm;
        self.latched.cancel |= input.cancel;
        self.accumulator += elapsed.min(MAX_ELAPSED);

        let mut due = Vec::new();
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            let pressed = std::mem::take(&mut self.latched);
            due.push(FlowInput {
                move_left: input.move_left,
                move_right: input.move_right,
                jump: input.jump,
                confirm: pressed.confirm,
                cancel: pressed.cancel,
            });
        }
        due
    }
}
