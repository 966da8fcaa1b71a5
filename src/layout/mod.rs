/// Contain-fit math and column placement.
pub mod fit;
