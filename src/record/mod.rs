//! Save-file records consumed and produced at scenario load and save.

mod architecture;

pub use architecture::{
    ARCHITECTURE_FILE, LEGACY_HEADER, RecordVersion, format_architectures, load_architectures,
    parse_architectures, read_architectures, write_architectures,
};
