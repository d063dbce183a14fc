pub mod artifact;
pub mod common;

pub use artifact::{Artifact, ClaimRecord};
pub use common::{
    hex_encode, parse_address, parse_allocations, parse_amount, parse_digest, read_allocations,
    write_file_atomic,
};
