//! Воспроизводимое разбиение на train/test

use rand::{Error as RandError, RngCore};

use crate::error::{PrepareError, Result};
use crate::types::Table;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Mersenne Twister MT19937 (32 бита), сидирование как в `init_genrand`
#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    pos: usize,
}

impl Mt19937 {
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, pos: N }
    }

    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.pos = 0;
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        if self.pos >= N {
            self.twist();
        }
        let mut y = self.state[self.pos];
        self.pos += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Случайное целое из `[0, max]` маскированной выборкой с отказами
pub fn bounded_interval<R: RngCore>(rng: &mut R, max: u64) -> u64 {
    if max == 0 {
        return 0;
    }

    let mut mask = max;
    mask |= mask >> 1;
    mask |= mask >> 2;
    mask |= mask >> 4;
    mask |= mask >> 8;
    mask |= mask >> 16;
    mask |= mask >> 32;

    loop {
        let value = if max <= u32::MAX as u64 {
            (rng.next_u32() as u64) & mask
        } else {
            rng.next_u64() & mask
        };
        if value <= max {
            return value;
        }
    }
}

/// Перестановка `0..n` обратным проходом Фишера-Йетса
pub fn permutation<R: RngCore>(rng: &mut R, n: usize) -> Vec<usize> {
    let mut items: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = bounded_interval(rng, i as u64) as usize;
        items.swap(i, j);
    }
    items
}

/// Одно перемешивающее разбиение с фиксированным seed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShuffleSplit {
    pub test_size: f64,
    pub random_state: u32,
}

impl ShuffleSplit {
    pub fn new(test_size: f64, random_state: u32) -> Self {
        Self {
            test_size,
            random_state,
        }
    }

    /// Размеры (train, test): тест округляется вверх
    pub fn sizes(&self, n_samples: usize) -> Result<(usize, usize)> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PrepareError::Split(format!(
                "test_size must lie in (0, 1), got {}",
                self.test_size
            )));
        }

        let n_test = (self.test_size * n_samples as f64).ceil() as usize;
        let n_train = n_samples.saturating_sub(n_test);

        if n_train == 0 || n_test == 0 {
            return Err(PrepareError::Split(format!(
                "with {} samples and test_size {} one of the subsets would be empty",
                n_samples, self.test_size
            )));
        }
        Ok((n_train, n_test))
    }

    /// Позиции строк (train, test) в порядке перестановки
    pub fn split_indices(&self, n_samples: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        let (_, n_test) = self.sizes(n_samples)?;

        let mut rng = Mt19937::new(self.random_state);
        let mut order = permutation(&mut rng, n_samples);
        let train = order.split_off(n_test);

        Ok((train, order))
    }

    /// Делит X и y одной и той же перестановкой
    pub fn split(&self, x: &Table, y: &Table) -> Result<(Table, Table, Table, Table)> {
        if x.nrows() != y.nrows() {
            return Err(PrepareError::Split(format!(
                "features have {} rows but targets have {}",
                x.nrows(),
                y.nrows()
            )));
        }

        let (train, test) = self.split_indices(x.nrows())?;
        tracing::debug!("Split {} rows into {} train / {} test", x.nrows(), train.len(), test.len());

        Ok((
            x.take_rows(&train)?,
            x.take_rows(&test)?,
            y.take_rows(&train)?,
            y.take_rows(&test)?,
        ))
    }
}
