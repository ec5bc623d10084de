//! Этапы подготовки датасета

pub mod cleaning;
pub mod encoding;
pub mod loader;
pub mod selection;
pub mod split;

pub use cleaning::Cleaner;
pub use encoding::{EncodedFrame, FrameEncoder, OneHotEncoder};
pub use loader::{CsvLoader, RawTable};
pub use selection::{ColumnSelection, SelectedRow, COLUMN_MAPPING};
pub use split::{Mt19937, ShuffleSplit};
