//! Enumerates Vulkan physical devices and prints their identity, memory
//! heaps, memory types and queue families.
//!
//! The reporting logic talks to the driver only through [`Driver`], so it
//! runs the same against the system loader ([`VulkanDriver`]) and against a
//! scripted driver in tests.

pub mod driver;
pub mod error;
pub mod format;
pub mod instance;
pub mod physical_device;
pub mod report;
pub mod status;

pub use driver::Driver;
pub use error::ReportError;
pub use instance::VulkanDriver;
pub use report::report;
