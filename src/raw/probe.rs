// A hybrid probe sequence.
//
// The probe sequence walks a group of slots linearly before making a
// quadratic jump, balancing cache locality with probe lengths. Because
// the jumps between groups are triangular and the table length is a
// power of two, every slot is visited exactly once per table length.
#[derive(Clone, Copy)]
pub struct Probe {
    // The current slot index.
    pub i: usize,
    // The number of slots visited so far.
    pub len: usize,
    // Mask for the length of the table.
    mask: usize,
    // The base index of the current group.
    base: usize,
    // The current quadratic stride.
    stride: usize,
}

impl Probe {
    // Number of linear probes per quadratic jump.
    const GROUP: usize = 8;

    // Start a probe sequence for the given hash over a table of `len`
    // slots. `len` must be a power of two.
    #[inline]
    pub fn start(hash: u64, len: usize) -> Probe {
        debug_assert!(len.is_power_of_two());

        let base = (hash as usize) & (len - 1);
        Probe {
            i: base,
            len: 0,
            mask: len - 1,
            base,
            stride: 0,
        }
    }

    // Advance to the next slot in the sequence.
    #[inline]
    pub fn next(&mut self) {
        self.len += 1;

        if self.len & (Probe::GROUP - 1) == 0 {
            self.stride += Probe::GROUP;
            self.base += self.stride;
            self.i = self.base;
        } else {
            self.i = self.base + (self.len & (Probe::GROUP - 1));
        }

        self.i &= self.mask;
    }
}
