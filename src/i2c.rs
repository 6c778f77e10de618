use std::ffi::CString;
use std::io;
use std::io::Error;
use std::io::ErrorKind;
use std::os::unix::io::RawFd;

use libc::c_ulong;
use libc::c_void;
use log::debug;

use crate::relay_ctl::RegisterTransport;

// from linux/i2c-dev.h
const I2C_SLAVE: c_ulong = 0x0703;

/// One register of one device on a local i2c bus, accessed through the
/// /dev/i2c-N device node.
pub struct I2cDev {
    fd: RawFd,
    register: u8,
}

impl I2cDev {
    /// Opens /dev/i2c-{bus} and binds the 7 bit slave address. The register
    /// number is kept and addressed on every transfer.
    pub fn open(bus: u8, address: u16, register: u8) -> io::Result<I2cDev> {
        let path = CString::new(format!("/dev/i2c-{}", bus))
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

        let fd = unsafe { libc::open(path.as_ptr(), libc::O_RDWR) };
        if fd < 0 {
            return Err(Error::last_os_error());
        }

        let result = unsafe { libc::ioctl(fd, I2C_SLAVE, c_ulong::from(address)) };
        if result < 0 {
            let error = Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(error);
        }

        debug!("Opened i2c bus {} for address {:#04x}", bus, address);
        Ok(I2cDev { fd, register })
    }

    fn write_raw(&mut self, data: &[u8]) -> io::Result<()> {
        let written = unsafe { libc::write(self.fd, data.as_ptr() as *const c_void, data.len()) };
        check_transfer(written, data.len())
    }
}

impl RegisterTransport for I2cDev {
    fn read_byte(&mut self) -> io::Result<u8> {
        // Address the register, then read it back in a second transfer.
        self.write_raw(&[self.register])?;

        let mut response = [0u8; 1];
        let read = unsafe { libc::read(self.fd, response.as_mut_ptr() as *mut c_void, 1) };
        check_transfer(read, 1)?;
        Ok(response[0])
    }

    fn write_byte(&mut self, value: u8) -> io::Result<()> {
        self.write_raw(&[self.register, value])
    }
}

impl Drop for I2cDev {
    fn drop(&mut self) {
        unsafe { libc::close(self.fd) };
    }
}

fn check_transfer(result: libc::ssize_t, expected: usize) -> io::Result<()> {
    if result < 0 {
        return Err(Error::last_os_error());
    }
    if result as usize != expected {
        return Err(Error::new(
            ErrorKind::UnexpectedEof,
            format!("Short i2c transfer: {} of {} bytes", result, expected),
        ));
    }
    Ok(())
}
