use crate::{Result, SeesawError};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// A connection that can be pointed at a device address on a shared bus.
pub trait AddressBind {
    /// # Errors
    /// Returns the error reported by the underlying control operation.
    fn set_target_address(&mut self, address: u16) -> io::Result<()>;
}

#[cfg(target_os = "linux")]
impl AddressBind for File {
    fn set_target_address(&mut self, address: u16) -> io::Result<()> {
        use crate::protocol_constants::I2C_SLAVE;
        use std::os::unix::io::AsRawFd;

        // SAFETY: I2C_SLAVE takes the address by value and touches no user memory.
        let rc = unsafe {
            libc::ioctl(
                self.as_raw_fd(),
                I2C_SLAVE as _,
                libc::c_ulong::from(address),
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
impl AddressBind for File {
    fn set_target_address(&mut self, _address: u16) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "i2c-dev addressing is only available on linux",
        ))
    }
}

/// An exclusively owned, addressed connection to one bus endpoint.
///
/// Every write and read is issued as a single transfer; partial transfers are
/// reported as [`SeesawError::ShortWrite`] / [`SeesawError::ShortRead`] and
/// never retried here.
#[derive(Debug)]
pub struct BusHandle<T: io::Read + io::Write> {
    connection: T,
    address: Option<u16>,
}

impl BusHandle<File> {
    /// Opens a bus device node for reading and writing.
    /// # Errors
    /// Returns [`SeesawError::TransportUnavailable`] if the node cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| SeesawError::TransportUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("opened bus {}", path.display());
        Ok(Self::new(connection))
    }
}

impl<T: io::Read + io::Write> BusHandle<T> {
    /// Wraps an already open [`std::io::Read`] + [`std::io::Write`] connection.
    pub fn new(connection: T) -> Self {
        Self {
            connection,
            address: None,
        }
    }

    /// Points the handle at `address`, replacing any previous target.
    /// # Errors
    /// Returns [`SeesawError::AddressBindFailed`] if the connection rejects the address.
    pub fn bind(&mut self, address: u16) -> Result<()>
    where
        T: AddressBind,
    {
        self.connection
            .set_target_address(address)
            .map_err(|source| SeesawError::AddressBindFailed { address, source })?;
        self.address = Some(address);
        debug!("bus bound to {address:#04x}");
        Ok(())
    }

    pub fn address(&self) -> Option<u16> {
        self.address
    }

    pub fn get_ref(&self) -> &T {
        &self.connection
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.connection
    }

    pub fn into_inner(self) -> T {
        self.connection
    }

    fn ensure_bound(&self) -> Result<()> {
        if self.address.is_none() {
            return Err(SeesawError::StateError(
                "bus handle has no target address",
            ));
        }
        Ok(())
    }

    /// Sends `bytes` as one transfer.
    /// # Errors
    /// Returns [`SeesawError::ShortWrite`] if the device accepts fewer bytes than given.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_bound()?;
        let written = self.connection.write(bytes)?;
        if written != bytes.len() {
            return Err(SeesawError::ShortWrite {
                expected: bytes.len(),
                actual: written,
            });
        }
        Ok(())
    }

    /// Reads exactly `length` bytes as one transfer.
    /// # Errors
    /// Returns [`SeesawError::ShortRead`] if fewer bytes arrive.
    pub fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        self.ensure_bound()?;
        let mut buf = vec![0; length];
        let received = self.connection.read(&mut buf)?;
        if received != length {
            return Err(SeesawError::ShortRead {
                expected: length,
                actual: received,
            });
        }
        Ok(buf)
    }
}
