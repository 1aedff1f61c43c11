//! Joint servos on a PCA9685 16-channel PWM expander.

use embedded_hal::i2c::I2c;
use pwm_pca9685::{Channel, Pca9685};
use robopuppy_common::PwmChannelDriver;

use crate::err::log::{err_pca_h, log_err, ErrLog, ERR_PCA_NO_CHANNEL};

/// Default I2C address of the expander board.
pub const PCA_9685_ADDR: u8 = 0x40;
/// 25 MHz / (4096 * 50 Hz) - 1
pub const PRESCALE_50HZ: u8 = 121;

/// Shared PWM bus for every joint on the robot.
pub struct ServoBus<I2C> {
    pca: Pca9685<I2C>,
    faults: u32,
    last_fault: Option<ErrLog>,
}

impl<I2C, E> ServoBus<I2C>
where
    I2C: I2c<Error = E>,
    E: embedded_hal::i2c::Error,
{
    /// Wakes the expander and sets the 50 Hz servo frame.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, ErrLog> {
        let mut pca = Pca9685::new(i2c, address).map_err(err_pca_h)?;
        pca.enable().map_err(err_pca_h)?;
        pca.set_prescale(PRESCALE_50HZ).map_err(err_pca_h)?;
        defmt::info!("pca9685 @ {:x} enabled, prescale {}", address, PRESCALE_50HZ);

        Ok(Self {
            pca,
            faults: 0,
            last_fault: None,
        })
    }

    /// Number of pulse writes that did not reach the expander.
    pub fn faults(&self) -> u32 {
        self.faults
    }

    pub fn last_fault(&self) -> Option<ErrLog> {
        self.last_fault
    }

    fn fault(&mut self, err: ErrLog) {
        self.faults = self.faults.wrapping_add(1);
        self.last_fault = Some(err);
        log_err(err);
    }
}

impl<I2C, E> PwmChannelDriver for ServoBus<I2C>
where
    I2C: I2c<Error = E>,
    E: embedded_hal::i2c::Error,
{
    fn set_pulse_width(&mut self, channel: u8, on: u16, off: u16) {
        let Some(ch) = channel_from_index(channel) else {
            defmt::warn!("no pca9685 channel {}", channel);
            self.fault(ERR_PCA_NO_CHANNEL);
            return;
        };
        if let Err(e) = self.pca.set_channel_on_off(ch, on, off) {
            let err = err_pca_h(e);
            self.fault(err);
        }
    }
}

fn channel_from_index(index: u8) -> Option<Channel> {
    let ch = match index {
        0 => Channel::C0,
        1 => Channel::C1,
        2 => Channel::C2,
        3 => Channel::C3,
        4 => Channel::C4,
        5 => Channel::C5,
        6 => Channel::C6,
        7 => Channel::C7,
        8 => Channel::C8,
        9 => Channel::C9,
        10 => Channel::C10,
        11 => Channel::C11,
        12 => Channel::C12,
        13 => Channel::C13,
        14 => Channel::C14,
        15 => Channel::C15,
        _ => return None,
    };
    Some(ch)
}
