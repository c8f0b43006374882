use std::fmt;

/// Compact bit matrix for storing binary data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-bounds reads are false
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// State of a single module while a symbol is under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    /// Not yet written
    Unset,
    /// Function area whose content is written after mask selection
    Reserved,
    /// Function pattern module (finder, separator, timing, alignment, format, version)
    Function(bool),
    /// Data or error correction module, subject to masking
    Data(bool),
}

impl Module {
    /// Dark modules are `Function(true)` and `Data(true)`
    pub fn is_dark(self) -> bool {
        matches!(self, Module::Function(true) | Module::Data(true))
    }

    /// Reserved and function modules are never touched by placement or masking
    pub fn is_function(self) -> bool {
        matches!(self, Module::Reserved | Module::Function(_))
    }
}

/// Square grid of modules, indexed by (row, col)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    /// Create a `size` x `size` matrix with every module unset
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Unset; size * size],
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (row, col); out-of-bounds reads are `Unset`
    pub fn get(&self, row: usize, col: usize) -> Module {
        if row >= self.size || col >= self.size {
            return Module::Unset;
        }
        self.modules[row * self.size + col]
    }

    /// Whether (row, col) is dark; out-of-bounds reads are light
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_dark()
    }

    /// Whether (row, col) belongs to a function pattern or reserved area
    pub fn is_function(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_function()
    }

    /// Draw a function module; overwrites reserved and function modules alike
    pub fn set_function(&mut self, row: usize, col: usize, dark: bool) {
        if row < self.size && col < self.size {
            self.modules[row * self.size + col] = Module::Function(dark);
        }
    }

    /// Reserve an unset module for content written later
    pub fn reserve(&mut self, row: usize, col: usize) {
        if row < self.size && col < self.size {
            let cell = &mut self.modules[row * self.size + col];
            if *cell == Module::Unset {
                *cell = Module::Reserved;
            }
        }
    }

    /// Write a data module. Returns false if the module is not free.
    pub fn set_data(&mut self, row: usize, col: usize, dark: bool) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        let cell = &mut self.modules[row * self.size + col];
        match *cell {
            Module::Unset => {
                *cell = Module::Data(dark);
                true
            }
            _ => false,
        }
    }

    /// Flip a data module; function and reserved modules are left untouched
    pub fn flip_data(&mut self, row: usize, col: usize) {
        if row < self.size && col < self.size {
            if let Module::Data(dark) = &mut self.modules[row * self.size + col] {
                *dark = !*dark;
            }
        }
    }

    /// Number of modules in the given state
    pub fn count(&self, predicate: impl Fn(Module) -> bool) -> usize {
        self.modules.iter().filter(|m| predicate(**m)).count()
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.count(Module::is_dark)
    }

    /// Pack the dark/light state into a bit matrix (x = col, y = row)
    pub fn to_bit_matrix(&self) -> BitMatrix {
        let mut bits = BitMatrix::new(self.size, self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_dark(row, col) {
                    bits.set(col, row, true);
                }
            }
        }
        bits
    }
}

impl fmt::Display for ModuleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let c = match self.get(row, col) {
                    Module::Unset => ' ',
                    Module::Reserved => '?',
                    m if m.is_dark() => '#',
                    _ => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
