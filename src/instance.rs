use std::ptr;

use ash::{prelude::VkResult, vk};

use crate::{
    driver::Driver,
    error::ReportError,
    physical_device::{DeviceProperties, MemoryLayout, QueueFamilyProperties},
};

pub struct VulkanDriver {
    pub entry: ash::Entry,
    pub instance: Option<ash::Instance>,
}

impl VulkanDriver {
    pub fn load() -> Result<Self, ReportError> {
        let entry = unsafe { ash::Entry::load()? };
        Ok(Self {
            entry,
            instance: None,
        })
    }

    fn instance(&self, handle: vk::Instance) -> VkResult<&ash::Instance> {
        self.instance
            .as_ref()
            .filter(|instance| instance.handle() == handle)
            .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)
    }

    fn current(&self) -> VkResult<&ash::Instance> {
        self.instance
            .as_ref()
            .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)
    }
}

impl Driver for VulkanDriver {
    fn create_instance(&mut self, create_info: &vk::InstanceCreateInfo) -> VkResult<vk::Instance> {
        let instance = unsafe { self.entry.create_instance(create_info, None)? };
        let handle = instance.handle();
        log::info!("created Vulkan instance {:?}", handle);
        self.instance = Some(instance);
        Ok(handle)
    }

    fn destroy_instance(&mut self, instance: vk::Instance) {
        if self.instance(instance).is_err() {
            log::warn!("ignoring release of unknown instance {:?}", instance);
            return;
        }
        if let Some(instance) = self.instance.take() {
            log::info!("destroying Vulkan instance {:?}", instance.handle());
            unsafe { instance.destroy_instance(None) };
        }
    }

    fn enumerate_physical_devices(
        &mut self,
        instance: vk::Instance,
        count: &mut u32,
        devices: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result {
        let instance = match self.instance(instance) {
            Ok(instance) => instance,
            Err(result) => return result,
        };
        let devices = match devices {
            Some(devices) => {
                *count = (*count).min(devices.len() as u32);
                devices.as_mut_ptr()
            }
            None => ptr::null_mut(),
        };
        unsafe {
            (instance.fp_v1_0().enumerate_physical_devices)(instance.handle(), count, devices)
        }
    }

    fn physical_device_properties(
        &mut self,
        device: vk::PhysicalDevice,
    ) -> VkResult<DeviceProperties> {
        let instance = self.current()?;
        let properties = unsafe { instance.get_physical_device_properties(device) };
        Ok(properties.into())
    }

    fn physical_device_memory_properties(
        &mut self,
        device: vk::PhysicalDevice,
    ) -> VkResult<MemoryLayout> {
        let instance = self.current()?;
        let memory_properties = unsafe { instance.get_physical_device_memory_properties(device) };
        Ok(memory_properties.into())
    }

    fn physical_device_queue_family_properties(
        &mut self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        families: Option<&mut [QueueFamilyProperties]>,
    ) -> vk::Result {
        let instance = match self.current() {
            Ok(instance) => instance,
            Err(result) => return result,
        };
        let get_queue_family_properties =
            instance.fp_v1_0().get_physical_device_queue_family_properties;
        match families {
            None => unsafe { get_queue_family_properties(device, count, ptr::null_mut()) },
            Some(families) => {
                *count = (*count).min(families.len() as u32);
                let mut raw = vec![vk::QueueFamilyProperties::default(); *count as usize];
                unsafe { get_queue_family_properties(device, count, raw.as_mut_ptr()) };
                let filled = raw.iter().take(*count as usize);
                for (family, properties) in families.iter_mut().zip(filled) {
                    *family = (*properties).into();
                }
            }
        }
        vk::Result::SUCCESS
    }
}
