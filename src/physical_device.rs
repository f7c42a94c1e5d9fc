use std::{ffi::CStr, fmt, os::raw::c_char};

use ash::vk;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemoryHeapFlags: u32 {
        const HOST_LOCAL = 1 << 0;
    }
}

bitflags! {
    /// An empty set means the memory type is device only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemoryPropertyFlags: u32 {
        const HOST_VISIBLE = 1 << 0;
        const HOST_NON_COHERENT = 1 << 1;
        const HOST_UNCACHED = 1 << 2;
        const HOST_WRITE_COMBINED = 1 << 3;
        const LAZILY_ALLOCATED = 1 << 4;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct QueueFlags: u32 {
        const GRAPHICS = 1 << 0;
        const COMPUTE = 1 << 1;
        const DMA = 1 << 2;
        const SPARSE_MEMMGR = 1 << 3;
        const EXTENDED = 1 << 30;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ApiVersion {
    pub fn from_packed(packed: u32) -> Self {
        Self {
            major: (packed >> 22) & 0x3FF,
            minor: (packed >> 12) & 0x3FF,
            patch: packed & 0xFFF,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProperties {
    pub name: String,
    pub device_type: vk::PhysicalDeviceType,
    pub api_version: u32,
    pub driver_version: u32,
    pub vendor_id: u32,
    pub device_id: u32,
}

impl DeviceProperties {
    pub fn api_version(&self) -> ApiVersion {
        ApiVersion::from_packed(self.api_version)
    }
}

impl From<vk::PhysicalDeviceProperties> for DeviceProperties {
    fn from(properties: vk::PhysicalDeviceProperties) -> Self {
        Self {
            name: device_name(&properties.device_name),
            device_type: properties.device_type,
            api_version: properties.api_version,
            driver_version: properties.driver_version,
            vendor_id: properties.vendor_id,
            device_id: properties.device_id,
        }
    }
}

/// Decodes a fixed-size name field; a missing NUL keeps the whole array.
pub fn device_name(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw.iter().map(|&c| c as u8).collect();
    match CStr::from_bytes_until_nul(&bytes) {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryHeap {
    pub size: u64,
    pub flags: MemoryHeapFlags,
}

impl From<vk::MemoryHeap> for MemoryHeap {
    fn from(heap: vk::MemoryHeap) -> Self {
        let mut flags = MemoryHeapFlags::empty();
        flags.set(
            MemoryHeapFlags::HOST_LOCAL,
            !heap.flags.contains(vk::MemoryHeapFlags::DEVICE_LOCAL),
        );
        Self {
            size: heap.size,
            flags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryType {
    pub heap_index: u32,
    pub flags: MemoryPropertyFlags,
}

impl From<vk::MemoryType> for MemoryType {
    fn from(memory_type: vk::MemoryType) -> Self {
        let vk_flags = memory_type.property_flags;
        let mut flags = MemoryPropertyFlags::empty();
        if vk_flags.contains(vk::MemoryPropertyFlags::HOST_VISIBLE) {
            let coherent = vk_flags.contains(vk::MemoryPropertyFlags::HOST_COHERENT);
            let cached = vk_flags.contains(vk::MemoryPropertyFlags::HOST_CACHED);
            flags |= MemoryPropertyFlags::HOST_VISIBLE;
            flags.set(MemoryPropertyFlags::HOST_NON_COHERENT, !coherent);
            flags.set(MemoryPropertyFlags::HOST_UNCACHED, !cached && !coherent);
            flags.set(MemoryPropertyFlags::HOST_WRITE_COMBINED, !cached && coherent);
        }
        flags.set(
            MemoryPropertyFlags::LAZILY_ALLOCATED,
            vk_flags.contains(vk::MemoryPropertyFlags::LAZILY_ALLOCATED),
        );
        Self {
            heap_index: memory_type.heap_index,
            flags,
        }
    }
}

/// Heaps and memory types of one device, in driver order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLayout {
    pub heaps: Vec<MemoryHeap>,
    pub types: Vec<MemoryType>,
}

impl MemoryLayout {
    pub fn types_of_heap(&self, heap: usize) -> impl Iterator<Item = (usize, &MemoryType)> {
        self.types
            .iter()
            .enumerate()
            .filter(move |(_, memory_type)| memory_type.heap_index as usize == heap)
    }

    /// Memory types whose heap index points past the heap list.
    pub fn orphaned_types(&self) -> impl Iterator<Item = (usize, &MemoryType)> {
        let heap_count = self.heaps.len();
        self.types
            .iter()
            .enumerate()
            .filter(move |(_, memory_type)| memory_type.heap_index as usize >= heap_count)
    }
}

impl From<vk::PhysicalDeviceMemoryProperties> for MemoryLayout {
    fn from(properties: vk::PhysicalDeviceMemoryProperties) -> Self {
        let heap_count = (properties.memory_heap_count as usize).min(vk::MAX_MEMORY_HEAPS);
        let type_count = (properties.memory_type_count as usize).min(vk::MAX_MEMORY_TYPES);
        Self {
            heaps: properties.memory_heaps[..heap_count]
                .iter()
                .copied()
                .map(MemoryHeap::from)
                .collect(),
            types: properties.memory_types[..type_count]
                .iter()
                .copied()
                .map(MemoryType::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFamilyProperties {
    pub queue_count: u32,
    pub flags: QueueFlags,
    pub supports_timestamps: bool,
}

impl From<vk::QueueFamilyProperties> for QueueFamilyProperties {
    fn from(properties: vk::QueueFamilyProperties) -> Self {
        let vk_flags = properties.queue_flags;
        let mut flags = QueueFlags::empty();
        flags.set(QueueFlags::GRAPHICS, vk_flags.contains(vk::QueueFlags::GRAPHICS));
        flags.set(QueueFlags::COMPUTE, vk_flags.contains(vk::QueueFlags::COMPUTE));
        flags.set(QueueFlags::DMA, vk_flags.contains(vk::QueueFlags::TRANSFER));
        flags.set(
            QueueFlags::SPARSE_MEMMGR,
            vk_flags.contains(vk::QueueFlags::SPARSE_BINDING),
        );
        let core = vk::QueueFlags::GRAPHICS
            | vk::QueueFlags::COMPUTE
            | vk::QueueFlags::TRANSFER
            | vk::QueueFlags::SPARSE_BINDING;
        flags.set(QueueFlags::EXTENDED, vk_flags.as_raw() & !core.as_raw() != 0);
        Self {
            queue_count: properties.queue_count,
            flags,
            supports_timestamps: properties.timestamp_valid_bits > 0,
        }
    }
}
