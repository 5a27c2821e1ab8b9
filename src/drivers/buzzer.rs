//! Piezo buzzer on a PWM channel.
//!
//! Frequency is fixed by the board bring-up; this driver only gates the
//! tone by switching between 50 % duty and fully off.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::Error;
use crate::pins::BUZZER_DUTY_PERCENT;

pub struct Buzzer<P> {
    pwm: P,
    on: bool,
}

impl<P: SetDutyCycle> Buzzer<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), Error> {
        let res = if on {
            self.pwm.set_duty_cycle_percent(BUZZER_DUTY_PERCENT)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        res.map_err(|_| Error::Alert)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
