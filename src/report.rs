use std::io::Write;

use ash::vk;

use crate::{
    driver::{self, Driver, PHYSICAL_DEVICES, QUEUE_FAMILIES},
    error::ReportError,
    format,
};

/// Lists every physical device the driver exposes.
///
/// Listings go to `out`; the count-shrink warning goes to `diagnostics`.
/// The first failing driver call aborts the report and leaves the instance
/// unreleased.
pub fn report<D, W, E>(driver: &mut D, out: &mut W, diagnostics: &mut E) -> Result<(), ReportError>
where
    D: Driver,
    W: Write,
    E: Write,
{
    let create_info = vk::InstanceCreateInfo::default();
    let instance = driver
        .create_instance(&create_info)
        .map_err(|result| ReportError::driver("vkCreateInstance", result))?;

    let physical_devices = driver::enumerate(PHYSICAL_DEVICES, diagnostics, |count, devices| {
        driver.enumerate_physical_devices(instance, count, devices)
    })?;

    writeln!(out, "PhysicalDevices:")?;
    for (index, &physical_device) in physical_devices.iter().enumerate() {
        dump_physical_device(driver, index, physical_device, out, diagnostics)?;
    }

    driver.destroy_instance(instance);
    Ok(())
}

fn dump_physical_device<D, W, E>(
    driver: &mut D,
    index: usize,
    physical_device: vk::PhysicalDevice,
    out: &mut W,
    diagnostics: &mut E,
) -> Result<(), ReportError>
where
    D: Driver,
    W: Write,
    E: Write,
{
    let properties = driver
        .physical_device_properties(physical_device)
        .map_err(|result| ReportError::driver("vkGetPhysicalDeviceProperties", result))?;
    writeln!(out, "{}", format::device_line(index, &properties))?;

    let memory = driver
        .physical_device_memory_properties(physical_device)
        .map_err(|result| ReportError::driver("vkGetPhysicalDeviceMemoryProperties", result))?;
    for (heap_index, heap) in memory.heaps.iter().enumerate() {
        writeln!(out, "{}", format::heap_line(heap_index, heap))?;
        for (type_index, memory_type) in memory.types_of_heap(heap_index) {
            writeln!(out, "{}", format::memory_type_line(type_index, memory_type))?;
        }
    }
    for (type_index, memory_type) in memory.orphaned_types() {
        log::warn!(
            "device {index}: memory type {type_index} references missing heap {}",
            memory_type.heap_index
        );
    }

    let families = driver::enumerate(QUEUE_FAMILIES, diagnostics, |count, families| {
        driver.physical_device_queue_family_properties(physical_device, count, families)
    })?;
    for (family_index, family) in families.iter().enumerate() {
        writeln!(out, "{}", format::queue_family_line(family_index, family)?)?;
    }
    Ok(())
}
