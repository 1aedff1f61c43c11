use defmt::error;
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource};

// enum containing all possible error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ErrLog {
    I2C(u8),
    PCA9685(u8),
    Config(u8),
    OS(u8),
}

// handler for logging i2c errors
pub fn err_i2c_h<E: i2c::Error>(err: E) -> ErrLog {
    let e: u8 = match err.kind() {
        ErrorKind::Overrun => 0x01,
        ErrorKind::Bus => 0x03,
        ErrorKind::ArbitrationLoss => 0x04,
        ErrorKind::NoAcknowledge(source) => match source {
            NoAcknowledgeSource::Address => 0x05,
            NoAcknowledgeSource::Unknown => 0x06,
            NoAcknowledgeSource::Data => 0x07,
        },
        _ => 0x09,
    };
    ErrLog::I2C(e)
}

// handler for pca9685 errors
pub fn err_pca_h<E: i2c::Error>(err: pwm_pca9685::Error<E>) -> ErrLog {
    match err {
        pwm_pca9685::Error::I2C(e) => err_i2c_h(e),
        pwm_pca9685::Error::InvalidInputData => ErrLog::PCA9685(0x01),
    }
}

// servo channel that the expander does not have
pub const ERR_PCA_NO_CHANNEL: ErrLog = ErrLog::PCA9685(0x02);

// handler for joint configuration errors
pub fn err_cfg_h(err: robopuppy_common::legs::BankError) -> ErrLog {
    use robopuppy_common::{legs::BankError, ConfigError};
    match err {
        BankError::Config(_, ConfigError::InvertedRange) => ErrLog::Config(0x01),
        BankError::Config(_, ConfigError::NonFiniteLimit) => ErrLog::Config(0x02),
        BankError::Config(_, ConfigError::NonFiniteTrim) => ErrLog::Config(0x03),
        BankError::Config(_, ConfigError::LegOutOfRange(_)) => ErrLog::Config(0x04),
        BankError::Config(_, ConfigError::DegeneratePulseMap) => ErrLog::Config(0x06),
        BankError::Misplaced(_) => ErrLog::Config(0x05),
    }
}

// os errors
pub enum RticErr {
    SpawnFail,
}

// handler for os errors
pub fn err_os_h(err: RticErr) -> ErrLog {
    ErrLog::OS(err as u8)
}

// For now, just print to the RTT console.
pub fn log_err(err: ErrLog) {
    match err {
        ErrLog::I2C(e) => error!("I2C {:x}", e),
        ErrLog::PCA9685(e) => error!("PCA9685 {:x}", e),
        ErrLog::Config(e) => error!("Config {:x}", e),
        ErrLog::OS(e) => error!("OS {:x}", e),
    }
}
