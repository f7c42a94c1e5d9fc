//! Error types for device reporting

use ash::vk;
use thiserror::Error;

use crate::status::result_label;

/// Everything that can stop a report before all devices are printed.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A driver call returned something other than `VK_SUCCESS`
    #[error("{call} failed: {} ({})", label(.result), .result.as_raw())]
    Driver {
        call: &'static str,
        result: vk::Result,
    },

    #[error("failed to load Vulkan loader: {0}")]
    Loader(#[from] ash::LoadingError),

    /// A queue family reported a capability bit with no known label
    #[error("queue family {family} reports unrecognized capability bit {bit:#x}")]
    UnknownQueueFlag { family: usize, bit: u32 },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

fn label(result: &vk::Result) -> &'static str {
    result_label(*result)
}

impl ReportError {
    pub(crate) fn driver(call: &'static str, result: vk::Result) -> Self {
        Self::Driver { call, result }
    }
}
