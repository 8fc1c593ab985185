pub mod shurjopay;
pub use self::shurjopay::Shurjopay;
