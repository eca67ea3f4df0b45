//! Event dispatch
//!
//! Routes each accepted input event to exactly one handler and resolves the
//! outcome into status frames. Errors never leave this module as errors:
//! they become an "Err" or "Busy" frame with a hold time.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;

use crate::config::ClockConfig;
use crate::input::DebounceFilter;
use crate::state::{Button, ClockError, ClockState, InputEvent, TimedEvent};
use crate::status::{Status, StatusFrame};
use crate::traits::{PwmOutput, SoftwareTimer};
use crate::waveform::{SharedFrequency, WaveformDriver};

/// Maximum status frames per response
pub const MAX_FRAMES: usize = 2;

/// Status frames produced by one event
pub type Frames = Vec<StatusFrame, MAX_FRAMES>;

/// Handler that ran for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Frequency restored to the default
    Reset,
    /// Last digit stepped
    Cycle,
    /// Frequency moved up one decade
    Shift,
    /// Output start attempted
    Start,
    /// Output stopped
    Stop,
    /// Single pulse attempted
    Pulse,
    /// Frequency set by the encoder
    SetFrequency,
}

/// Outcome of one dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Handler that ran
    pub action: Action,
    /// Whether the handler succeeded
    pub result: Result<(), ClockError>,
    /// Frames to show in order, each held for its `hold_ms`
    pub frames: Frames,
}

impl Response {
    fn ok(action: Action, frames: &[StatusFrame]) -> Self {
        Self {
            action,
            result: Ok(()),
            frames: frames_from(frames),
        }
    }
}

fn frames_from(frames: &[StatusFrame]) -> Frames {
    let mut out = Vec::new();
    for frame in frames.iter().take(MAX_FRAMES) {
        let _ = out.push(*frame);
    }
    out
}

/// Dispatch router
///
/// Owns the clock state, the debounce filter and the waveform driver.
pub struct Controller<'a, T, P, O, L> {
    state: ClockState<'a>,
    debounce: DebounceFilter,
    driver: WaveformDriver<T, P, O, L>,
}

impl<'a, T, P, O, L> Controller<'a, T, P, O, L>
where
    T: SoftwareTimer,
    P: PwmOutput,
    O: OutputPin,
    L: OutputPin,
{
    /// Create a controller; the frequency cell is set to the default
    pub fn new(
        config: ClockConfig,
        frequency: &'a SharedFrequency,
        driver: WaveformDriver<T, P, O, L>,
    ) -> Self {
        Self {
            state: ClockState::new(config, frequency),
            debounce: DebounceFilter::new(config.debounce_ms),
            driver,
        }
    }

    /// Get the clock state
    pub fn state(&self) -> &ClockState<'a> {
        &self.state
    }

    /// Frames for the boot splash
    pub fn splash(&self) -> Frames {
        frames_from(&[
            StatusFrame::splash(),
            StatusFrame::show(Status::Frequency(self.state.frequency())),
        ])
    }

    /// Handle one timestamped event
    ///
    /// Button presses go through the debounce filter first and are dropped
    /// (`None`) inside the window. Encoder changes are never filtered.
    pub fn handle<D: DelayNs>(&mut self, event: TimedEvent, delay: &mut D) -> Option<Response> {
        if event.is_debounced() && !self.debounce.accept(event.at_ms) {
            return None;
        }
        Some(self.dispatch(event.event, delay))
    }

    /// Run the handler for an event, bypassing the debounce filter
    pub fn dispatch<D: DelayNs>(&mut self, event: InputEvent, delay: &mut D) -> Response {
        match event {
            InputEvent::Pressed(button) => self.press(button, delay),
            InputEvent::EncoderChanged(value) => {
                let frequency = self.state.set_direct(value);
                Response::ok(
                    Action::SetFrequency,
                    &[StatusFrame::show(Status::Frequency(frequency))],
                )
            }
        }
    }

    fn press<D: DelayNs>(&mut self, button: Button, delay: &mut D) -> Response {
        match button {
            Button::Reset => self.reset(),
            Button::Cycle => {
                let result = self.state.cycle_digit();
                self.edited(Action::Cycle, result)
            }
            Button::Shift => {
                let result = self.state.shift();
                self.edited(Action::Shift, result)
            }
            Button::Set => self.start(),
            Button::StartStop => {
                if self.state.is_running() {
                    self.stop()
                } else {
                    self.start()
                }
            }
            Button::Pulse => match self.driver.pulse(&self.state, delay) {
                Ok(_) => Response::ok(Action::Pulse, &[]),
                Err(e) => self.failure(Action::Pulse, e),
            },
        }
    }

    fn reset(&mut self) -> Response {
        match self.state.reset() {
            Ok(frequency) => {
                self.driver.led_off();
                Response::ok(
                    Action::Reset,
                    &[
                        StatusFrame::held(Status::Reset),
                        StatusFrame::show(Status::Frequency(frequency)),
                    ],
                )
            }
            Err(e) => self.failure(Action::Reset, e),
        }
    }

    fn edited(&self, action: Action, result: Result<u32, ClockError>) -> Response {
        match result {
            Ok(frequency) => {
                Response::ok(action, &[StatusFrame::show(Status::Frequency(frequency))])
            }
            Err(e) => self.failure(action, e),
        }
    }

    fn start(&mut self) -> Response {
        match self.driver.start(&mut self.state) {
            Ok(_) => Response::ok(Action::Start, &[StatusFrame::held(Status::Running)]),
            Err(e) => self.failure(Action::Start, e),
        }
    }

    fn stop(&mut self) -> Response {
        self.driver.stop(&mut self.state);
        Response::ok(
            Action::Stop,
            &[
                StatusFrame::held(Status::Stopped),
                StatusFrame::show(Status::Frequency(self.state.frequency())),
            ],
        )
    }

    fn failure(&self, action: Action, error: ClockError) -> Response {
        let frames = match error {
            ClockError::FrequencyExceeded => frames_from(&[
                StatusFrame::error(),
                StatusFrame::show(self.resting_status()),
            ]),
            ClockError::ClockBusy => frames_from(&[
                StatusFrame::held(Status::Busy),
                StatusFrame::show(self.resting_status()),
            ]),
            ClockError::NoDisplayFound => Vec::new(),
        };
        Response {
            action,
            result: Err(error),
            frames,
        }
    }

    /// What the display shows between events
    fn resting_status(&self) -> Status {
        if self.state.is_running() {
            Status::Running
        } else {
            Status::Frequency(self.state.frequency())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GenerationMode, GeneratorState};
    use crate::waveform::driver::mock::*;

    type TestController<'a> =
        Controller<'a, MockTimer<'a>, MockPwm<'a>, MockOutput<'a>, MockLed<'a>>;

    fn controller<'a>(log: &'a Log, cell: &'a SharedFrequency) -> TestController<'a> {
        let driver = WaveformDriver::new(MockTimer(log), MockPwm(log), MockOutput(log), MockLed(log));
        log.clear();
        Controller::new(ClockConfig::default(), cell, driver)
    }

    fn press(button: Button) -> InputEvent {
        InputEvent::Pressed(button)
    }

    #[test]
    fn test_splash() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let controller = controller(&log, &cell);
        assert_eq!(
            controller.splash().as_slice(),
            &[
                StatusFrame::new(Status::Splash, 3000),
                StatusFrame::show(Status::Frequency(1)),
            ]
        );
    }

    #[test]
    fn test_debounce_applies_across_buttons() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        let first = controller.handle(TimedEvent::new(press(Button::Cycle), 1000), &mut delay);
        assert_eq!(first.map(|r| r.action), Some(Action::Cycle));

        let second = controller.handle(TimedEvent::new(press(Button::Shift), 1300), &mut delay);
        assert_eq!(second, None);
        assert_eq!(controller.state().frequency(), 2);

        let third = controller.handle(TimedEvent::new(press(Button::Shift), 1501), &mut delay);
        assert_eq!(third.map(|r| r.action), Some(Action::Shift));
        assert_eq!(controller.state().frequency(), 20);
    }

    #[test]
    fn test_encoder_skips_debounce() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        let at = |v, ms| TimedEvent::new(InputEvent::EncoderChanged(v), ms);
        assert!(controller.handle(at(5, 10), &mut delay).is_some());
        assert!(controller.handle(at(6, 11), &mut delay).is_some());
        assert_eq!(cell.load(), 6);
    }

    #[test]
    fn test_shift_to_pwm_and_back() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        for _ in 0..3 {
            controller.dispatch(press(Button::Shift), &mut delay);
        }
        assert_eq!(controller.state().frequency(), 1000);

        let response = controller.dispatch(press(Button::Set), &mut delay);
        assert_eq!(response.action, Action::Start);
        assert_eq!(response.result, Ok(()));
        assert_eq!(response.frames.as_slice(), &[StatusFrame::new(Status::Running, 2000)]);
        assert_eq!(
            controller.state().generator(),
            GeneratorState::Running(GenerationMode::HardwarePwm)
        );
        assert_eq!(log.calls().as_slice(), &[Call::PwmStart(1000, 32512), Call::Led(true)]);

        log.clear();
        let response = controller.dispatch(press(Button::StartStop), &mut delay);
        assert_eq!(response.action, Action::Stop);
        assert_eq!(
            response.frames.as_slice(),
            &[
                StatusFrame::new(Status::Stopped, 2000),
                StatusFrame::show(Status::Frequency(1000)),
            ]
        );
        assert_eq!(controller.state().generator(), GeneratorState::Idle);
        assert_eq!(
            log.calls().as_slice(),
            &[Call::PwmDuty(0), Call::PwmStop, Call::Led(false)]
        );
    }

    #[test]
    fn test_software_timed_start() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        controller.dispatch(InputEvent::EncoderChanged(5), &mut delay);
        controller.dispatch(press(Button::StartStop), &mut delay);

        assert_eq!(
            controller.state().generator(),
            GeneratorState::Running(GenerationMode::SoftwareTimed)
        );
        assert_eq!(log.calls()[0], Call::TimerStart(5));
        assert_eq!(cell.half_period_us(), 100_000);
    }

    #[test]
    fn test_edits_while_running_are_busy() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        controller.dispatch(press(Button::Set), &mut delay);
        log.clear();

        for button in [Button::Reset, Button::Cycle, Button::Shift, Button::Set, Button::Pulse] {
            let response = controller.dispatch(press(button), &mut delay);
            assert_eq!(response.result, Err(ClockError::ClockBusy));
            assert_eq!(
                response.frames.as_slice(),
                &[
                    StatusFrame::new(Status::Busy, 2000),
                    StatusFrame::show(Status::Running),
                ]
            );
        }
        assert_eq!(controller.state().frequency(), 1);
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_reset_turns_led_off() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        controller.dispatch(InputEvent::EncoderChanged(250), &mut delay);
        let response = controller.dispatch(press(Button::Reset), &mut delay);

        assert_eq!(response.result, Ok(()));
        assert_eq!(
            response.frames.as_slice(),
            &[
                StatusFrame::new(Status::Reset, 2000),
                StatusFrame::show(Status::Frequency(1)),
            ]
        );
        assert_eq!(log.calls().as_slice(), &[Call::Led(false)]);
        assert_eq!(cell.load(), 1);
    }

    #[test]
    fn test_start_over_limit_shows_error() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        controller.dispatch(InputEvent::EncoderChanged(200_000_000), &mut delay);
        let response = controller.dispatch(press(Button::StartStop), &mut delay);

        assert_eq!(response.result, Err(ClockError::FrequencyExceeded));
        assert_eq!(
            response.frames.as_slice(),
            &[
                StatusFrame::new(Status::Error, 3000),
                StatusFrame::show(Status::Frequency(200_000_000)),
            ]
        );
        assert!(!controller.state().is_running());
        assert!(log.calls().is_empty());
    }

    #[test]
    fn test_encoder_sets_while_running() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        controller.dispatch(press(Button::Set), &mut delay);
        let response = controller.dispatch(InputEvent::EncoderChanged(8), &mut delay);

        assert_eq!(response.action, Action::SetFrequency);
        assert_eq!(response.frames.as_slice(), &[StatusFrame::show(Status::Frequency(8))]);
        assert!(controller.state().is_running());
        assert_eq!(cell.load(), 8);
    }

    #[test]
    fn test_encoder_across_threshold_then_restart() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        controller.dispatch(InputEvent::EncoderChanged(5), &mut delay);
        controller.dispatch(press(Button::StartStop), &mut delay);
        controller.dispatch(InputEvent::EncoderChanged(15), &mut delay);

        log.clear();
        let response = controller.dispatch(press(Button::StartStop), &mut delay);
        assert_eq!(response.action, Action::Stop);
        assert_eq!(log.calls().as_slice(), &[Call::TimerStop, Call::Led(false)]);
        assert_eq!(controller.state().generator(), GeneratorState::Idle);

        log.clear();
        let response = controller.dispatch(press(Button::StartStop), &mut delay);
        assert_eq!(response.action, Action::Start);
        assert_eq!(log.calls().as_slice(), &[Call::PwmStart(15, 32512), Call::Led(true)]);
        assert_eq!(
            controller.state().generator(),
            GeneratorState::Running(GenerationMode::HardwarePwm)
        );
    }

    #[test]
    fn test_pulse_has_no_frames() {
        let log = Log::new();
        let cell = SharedFrequency::new(0);
        let mut controller = controller(&log, &cell);
        let mut delay = MockDelay(&log);

        let response = controller.dispatch(press(Button::Pulse), &mut delay);
        assert_eq!(response.result, Ok(()));
        assert!(response.frames.is_empty());
        assert!(log.calls().contains(&Call::Delay(500_000)));
    }
}
