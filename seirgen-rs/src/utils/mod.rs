mod age;

pub use age::*;
