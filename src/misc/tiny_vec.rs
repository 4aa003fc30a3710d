use std::ops::Deref;

/// Fixed capacity vector stored inline. Used for dice multisets, which never
/// hold more than four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TinyVec<T, const N: usize>
where
    T: Copy + Default,
{
    buf: [T; N],
    len: u8,
}

impl<T, const N: usize> TinyVec<T, N>
where
    T: Copy + Default,
{
    pub fn new() -> Self {
        const { assert!(N <= 255, "TinyVec supports up to 255 elements") }
        TinyVec { buf: [T::default(); N], len: 0 }
    }

    pub fn from_slice(values: &[T]) -> Self {
        let mut vec = Self::new();
        for &v in values.iter().take(N) {
            vec.push(v);
        }
        vec
    }

    /// Appends a value. Values beyond the capacity are dropped.
    pub fn push(&mut self, val: T) {
        if (self.len as usize) < N {
            self.buf[self.len as usize] = val;
            self.len += 1;
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.buf[self.len as usize])
    }

    pub fn remove_at(&mut self, idx: usize) -> Option<T> {
        if idx >= self.len as usize {
            return None;
        }
        let val = self.buf[idx];
        for i in idx..(self.len as usize - 1) {
            self.buf[i] = self.buf[i + 1];
        }
        self.len -= 1;
        Some(val)
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T, const N: usize> TinyVec<T, N>
where
    T: Copy + Default + PartialEq,
{
    /// Removes the first element equal to `val`. Returns whether one was found.
    pub fn remove_value(&mut self, val: T) -> bool {
        match self.iter().position(|&x| x == val) {
            Some(idx) => self.remove_at(idx).is_some(),
            None => false,
        }
    }
}

impl<T, const N: usize> Default for TinyVec<T, N>
where
    T: Copy + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> Deref for TinyVec<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.buf[..self.len as usize]
    }
}
