//! Amplitude storage with aligned memory for SIMD kernels

use crate::config::MAX_QUBITS;
use crate::error::{Result, StateError};
use num_complex::Complex32;
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

/// Alignment requirement for SIMD operations (64 bytes for AVX-512)
pub const SIMD_ALIGNMENT: usize = 64;

/// Owned, 64-byte aligned block of `Complex32` values
struct AlignedBuffer {
    data: NonNull<Complex32>,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocate `len` zeroed amplitudes
    fn zeroed(len: usize) -> Result<Self> {
        let size = len
            .checked_mul(std::mem::size_of::<Complex32>())
            .ok_or(StateError::AllocationError { size: usize::MAX })?;
        let layout = Layout::from_size_align(size, SIMD_ALIGNMENT)
            .map_err(|_| StateError::AllocationError { size })?;

        // An all-zero bit pattern is 0.0 + 0.0i
        let data = unsafe {
            let ptr = alloc_zeroed(layout) as *mut Complex32;
            NonNull::new(ptr).ok_or(StateError::AllocationError { size })?
        };

        Ok(Self { data, len, layout })
    }

    #[inline]
    fn as_slice(&self) -> &[Complex32] {
        unsafe { std::slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [Complex32] {
        unsafe { std::slice::from_raw_parts_mut(self.data.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        unsafe {
            dealloc(self.data.as_ptr() as *mut u8, self.layout);
        }
    }
}

// Safety: AlignedBuffer owns its allocation and hands out borrows only
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

/// Dense amplitude vector for an n-qubit register
///
/// Holds one `Complex32` per basis state, indexed by the basis-state bit
/// pattern. The backing buffer is allocated on the first [`create`] call and
/// reused by every later one.
///
/// # Example
///
/// ```
/// use simq_statespace::AmplitudeStore;
/// use num_complex::Complex32;
///
/// let mut store = AmplitudeStore::new(2).unwrap();
/// store.create().unwrap();
/// store.set(3, Complex32::new(0.0, 1.0)).unwrap();
/// assert_eq!(store.dimension(), 4);
/// assert_eq!(store.get(0).unwrap(), Complex32::new(1.0, 0.0));
/// ```
///
/// [`create`]: AmplitudeStore::create
pub struct AmplitudeStore {
    /// Number of qubits
    num_qubits: usize,

    /// Number of amplitudes (2^num_qubits)
    dimension: usize,

    /// Backing memory, `None` until the first `create`
    buffer: Option<AlignedBuffer>,
}

impl AmplitudeStore {
    /// Declare a store for `num_qubits` qubits without allocating it
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `num_qubits` exceeds [`MAX_QUBITS`]
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(StateError::invalid_config(format!(
                "{} qubits exceeds the supported limit of {}",
                num_qubits, MAX_QUBITS
            )));
        }

        Ok(Self {
            num_qubits,
            dimension: 1 << num_qubits,
            buffer: None,
        })
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether `create` has been called at least once
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.buffer.is_some()
    }

    /// Reset the store to |0...0⟩, allocating it on first use
    ///
    /// Each call overwrites everything written since the last one.
    pub fn create(&mut self) -> Result<()> {
        match self.buffer.as_mut() {
            Some(buffer) => buffer.as_mut_slice().fill(Complex32::new(0.0, 0.0)),
            None => self.buffer = Some(AlignedBuffer::zeroed(self.dimension)?),
        }
        self.amplitudes_mut()?[0] = Complex32::new(1.0, 0.0);
        Ok(())
    }

    /// Read the amplitude of basis state `index`
    pub fn get(&self, index: u64) -> Result<Complex32> {
        let i = self.check_index(index)?;
        Ok(self.amplitudes()?[i])
    }

    /// Write the amplitude of basis state `index`
    pub fn set(&mut self, index: u64, value: Complex32) -> Result<()> {
        let i = self.check_index(index)?;
        self.amplitudes_mut()?[i] = value;
        Ok(())
    }

    /// Get a reference to all amplitudes
    pub fn amplitudes(&self) -> Result<&[Complex32]> {
        self.buffer
            .as_ref()
            .map(AlignedBuffer::as_slice)
            .ok_or(StateError::NotInitialized)
    }

    /// Get a mutable reference to all amplitudes
    pub fn amplitudes_mut(&mut self) -> Result<&mut [Complex32]> {
        self.buffer
            .as_mut()
            .map(AlignedBuffer::as_mut_slice)
            .ok_or(StateError::NotInitialized)
    }

    /// Overwrite every amplitude from `amplitudes`
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if the length is not 2^num_qubits
    pub fn copy_from(&mut self, amplitudes: &[Complex32]) -> Result<()> {
        if amplitudes.len() != self.dimension {
            return Err(StateError::invalid_config(format!(
                "expected {} amplitudes, got {}",
                self.dimension,
                amplitudes.len()
            )));
        }
        self.amplitudes_mut()?.copy_from_slice(amplitudes);
        Ok(())
    }

    /// Check if the backing buffer is properly aligned for SIMD
    pub fn is_simd_aligned(&self) -> bool {
        self.buffer
            .as_ref()
            .map_or(false, |b| (b.data.as_ptr() as usize) % SIMD_ALIGNMENT == 0)
    }

    #[inline]
    fn check_index(&self, index: u64) -> Result<usize> {
        if index >= self.dimension as u64 {
            return Err(StateError::IndexOutOfRange {
                index,
                dimension: self.dimension,
            });
        }
        Ok(index as usize)
    }
}
