//! Small text helpers shared by the scanners, formatters and the driver.

pub mod ascii;
pub mod cursor;
pub mod keywords;
pub mod text;
