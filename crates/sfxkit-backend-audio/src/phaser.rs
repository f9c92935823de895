//! Phaser: the signal mixed with a swept-delay copy of itself.

use sfxkit_spec::ParameterSet;

/// Delay line length in sub-samples. Must be a power of two.
pub const PHASER_BUFFER_LEN: usize = 1024;

const MASK: usize = PHASER_BUFFER_LEN - 1;

/// Ring buffer of past sub-samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayLine {
    buffer: Vec<f64>,
    write_pos: usize,
}

impl Default for DelayLine {
    fn default() -> Self {
        Self {
            buffer: vec![0.0; PHASER_BUFFER_LEN],
            write_pos: 0,
        }
    }
}

impl DelayLine {
    /// Stores `sample` at the write position without advancing it.
    pub fn write(&mut self, sample: f64) {
        self.buffer[self.write_pos & MASK] = sample;
    }

    /// Reads the sample written `delay` sub-samples before the write position.
    pub fn read(&self, delay: usize) -> f64 {
        self.buffer[(self.write_pos + PHASER_BUFFER_LEN - (delay & MASK)) & MASK]
    }

    /// Moves the write position forward by one.
    pub fn advance(&mut self) {
        self.write_pos = (self.write_pos + 1) & MASK;
    }
}

/// Swept comb-style phaser.
#[derive(Debug, Clone, PartialEq)]
pub struct Phaser {
    enabled: bool,
    offset: f64,
    offset_sweep: f64,
    tap: usize,
    line: DelayLine,
}

impl Phaser {
    /// Builds the phaser from a parameter set with a zeroed delay line.
    pub fn from_params(params: &ParameterSet) -> Self {
        let mut offset = params.phaser_offset * params.phaser_offset * 1020.0;
        if params.phaser_offset < 0.0 {
            offset = -offset;
        }
        let sweep = params.phaser_sweep;
        Self {
            enabled: params.phaser_offset != 0.0 || params.phaser_sweep != 0.0,
            offset,
            offset_sweep: sweep * sweep * sweep * 0.2,
            tap: 0,
            line: DelayLine::default(),
        }
    }

    /// Whether the phaser touches the signal.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current tap distance in sub-samples.
    pub fn tap(&self) -> usize {
        self.tap
    }

    /// Current (unclamped) offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Per-output-sample update: sweeps the offset and recomputes the tap.
    pub fn sweep(&mut self) {
        if !self.enabled {
            return;
        }
        self.offset += self.offset_sweep;
        let tap = (self.offset as i64).unsigned_abs();
        self.tap = tap.min(MASK as u64) as usize;
    }

    /// Processes one sub-sample; a disabled phaser passes it through.
    pub fn process(&mut self, input: f64) -> f64 {
        if !self.enabled {
            return input;
        }
        self.line.write(input);
        let output = input + self.line.read(self.tap);
        self.line.advance();
        output
    }
}
