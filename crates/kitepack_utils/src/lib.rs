pub mod bitset;
pub mod concat_string;
pub mod indexmap;
pub mod path_ext;
pub mod unique_name;
pub mod xxhash;
