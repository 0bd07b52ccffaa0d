//! Mapping from the lines of a derived text back to the lines it came from
//!
//! Block comments can swallow line breaks, so after stripping, line `n` of
//! the output is not necessarily line `n` of the file.

/// `origins[i]` is the source line of derived line `i + 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMap {
    origins: Vec<u32>,
}

impl LineMap {
    /// Every line maps to itself
    pub fn identity() -> Self {
        Self {
            origins: Vec::new(),
        }
    }

    pub fn from_origins(origins: Vec<u32>) -> Self {
        Self { origins }
    }

    /// Source line of a derived line (1-based).
    ///
    /// Lines past the recorded range continue one-to-one from the last entry.
    pub fn origin(&self, line: u32) -> u32 {
        if line == 0 {
            return 0;
        }
        let idx = (line - 1) as usize;
        match self.origins.get(idx) {
            Some(origin) => *origin,
            None => match self.origins.last() {
                Some(last) => last + (line - self.origins.len() as u32),
                None => line,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl Default for LineMap {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let map = LineMap::identity();
        assert_eq!(map.origin(1), 1);
        assert_eq!(map.origin(42), 42);
    }

    #[test]
    fn test_recorded_and_extrapolated_lines() {
        let map = LineMap::from_origins(vec![1, 4, 5]);
        assert_eq!(map.origin(2), 4);
        assert_eq!(map.origin(3), 5);
        assert_eq!(map.origin(5), 7);
        assert_eq!(map.origin(0), 0);
    }
}
