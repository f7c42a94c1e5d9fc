//! The calls the reporter makes into a graphics driver.

use std::io::Write;

use ash::{prelude::VkResult, vk};

use crate::{
    error::ReportError,
    physical_device::{DeviceProperties, MemoryLayout, QueueFamilyProperties},
};

/// A graphics driver exposing the Vulkan 1.0 query surface.
///
/// List-returning queries follow the count-then-fill convention: passing
/// `None` stores the number of available items in `count`; passing a buffer
/// fills at most `*count` items, stores how many were written and returns
/// `VK_INCOMPLETE` if more were available.
pub trait Driver {
    fn create_instance(&mut self, create_info: &vk::InstanceCreateInfo) -> VkResult<vk::Instance>;

    fn destroy_instance(&mut self, instance: vk::Instance);

    fn enumerate_physical_devices(
        &mut self,
        instance: vk::Instance,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result;

    fn physical_device_properties(
        &mut self,
        device: vk::PhysicalDevice,
    ) -> VkResult<DeviceProperties>;

    fn physical_device_memory_properties(
        &mut self,
        device: vk::PhysicalDevice,
    ) -> VkResult<MemoryLayout>;

    fn physical_device_queue_family_properties(
        &mut self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        families: Option<&mut [QueueFamilyProperties]>,
    ) -> vk::Result;
}

#[derive(Debug, Clone, Copy)]
pub struct TwoPhaseQuery {
    pub count_call: &'static str,
    pub values_call: &'static str,
    pub items: &'static str,
}

pub const PHYSICAL_DEVICES: TwoPhaseQuery = TwoPhaseQuery {
    count_call: "vkEnumeratePhysicalDevices (count)",
    values_call: "vkEnumeratePhysicalDevices (data)",
    items: "physical devices",
};

pub const QUEUE_FAMILIES: TwoPhaseQuery = TwoPhaseQuery {
    count_call: "vkGetPhysicalDeviceQueueFamilyProperties (count)",
    values_call: "vkGetPhysicalDeviceQueueFamilyProperties (values)",
    items: "queue families",
};

/// Runs a count-then-fill query, truncating with a warning to `diagnostics`
/// when the fill reports fewer items than the count did.
pub fn enumerate<T, F, E>(
    query: TwoPhaseQuery,
    diagnostics: &mut E,
    mut call: F,
) -> Result<Vec<T>, ReportError>
where
    T: Clone + Default,
    F: FnMut(&mut u32, Option<&mut [T]>) -> vk::Result,
    E: Write,
{
    let mut count = 0;
    let result = call(&mut count, None);
    log::debug!("{} -> {:?}, {} {}", query.count_call, result, count, query.items);
    if result != vk::Result::SUCCESS {
        return Err(ReportError::driver(query.count_call, result));
    }

    let mut items = vec![T::default(); count as usize];
    let result = call(&mut count, Some(items.as_mut_slice()));
    log::debug!("{} -> {:?}, {} {}", query.values_call, result, count, query.items);
    match result {
        vk::Result::SUCCESS => {}
        // More items appeared than the buffer holds; keep what fits.
        vk::Result::INCOMPLETE => return Ok(items),
        _ => return Err(ReportError::driver(query.values_call, result)),
    }

    let filled = (count as usize).min(items.len());
    if filled < items.len() {
        writeln!(
            diagnostics,
            "number of {} decreased from {} to {}!",
            query.items,
            items.len(),
            filled
        )?;
        items.truncate(filled);
    }
    Ok(items)
}
