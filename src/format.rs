//! Text rendering of the queried snapshots.
//!
//! Each function returns one output line without the trailing newline.

use ash::vk;

use crate::{
    error::ReportError,
    physical_device::{
        DeviceProperties, MemoryHeap, MemoryHeapFlags, MemoryPropertyFlags, MemoryType,
        QueueFamilyProperties, QueueFlags,
    },
};

pub const UNKNOWN_DEVICE_TYPE: &str = "<UNKNOWN>";

pub fn device_type_label(device_type: vk::PhysicalDeviceType) -> &'static str {
    match device_type {
        vk::PhysicalDeviceType::OTHER => "OTHER",
        vk::PhysicalDeviceType::INTEGRATED_GPU => "INTEGRATED_GPU",
        vk::PhysicalDeviceType::DISCRETE_GPU => "DISCRETE_GPU",
        vk::PhysicalDeviceType::VIRTUAL_GPU => "VIRTUAL_GPU",
        vk::PhysicalDeviceType::CPU => "CPU",
        _ => UNKNOWN_DEVICE_TYPE,
    }
}

pub fn queue_flag_label(flag: QueueFlags) -> Option<&'static str> {
    const LABELS: [(QueueFlags, &str); 5] = [
        (QueueFlags::GRAPHICS, "GRAPHICS"),
        (QueueFlags::COMPUTE, "COMPUTE"),
        (QueueFlags::DMA, "DMA"),
        (QueueFlags::SPARSE_MEMMGR, "SPARSE"),
        (QueueFlags::EXTENDED, "EXT"),
    ];

    LABELS
        .iter()
        .find(|(known, _)| *known == flag)
        .map(|(_, label)| *label)
}

/// `+`-joined capability labels, lowest bit first. Errs with the first
/// unlabeled bit.
pub fn queue_flags_label(flags: QueueFlags) -> Result<String, u32> {
    let mut remaining = flags.bits();
    let mut label = String::new();
    while remaining != 0 {
        let bit = 1 << remaining.trailing_zeros();
        let name = queue_flag_label(QueueFlags::from_bits_retain(bit)).ok_or(bit)?;
        if !label.is_empty() {
            label.push('+');
        }
        label.push_str(name);
        remaining &= !bit;
    }
    Ok(label)
}

pub fn heap_flags_label(flags: MemoryHeapFlags) -> &'static str {
    if flags.contains(MemoryHeapFlags::HOST_LOCAL) {
        "HOST_LOCAL"
    } else {
        ""
    }
}

// Labels after HOST_VISIBLE carry their own leading space.
pub fn memory_flags_label(flags: MemoryPropertyFlags) -> String {
    const SUFFIXES: [(MemoryPropertyFlags, &str); 4] = [
        (MemoryPropertyFlags::HOST_NON_COHERENT, " NON_COHERENT"),
        (MemoryPropertyFlags::HOST_UNCACHED, " UNCACHED"),
        (MemoryPropertyFlags::HOST_WRITE_COMBINED, " WRITE_COMBINED"),
        (MemoryPropertyFlags::LAZILY_ALLOCATED, " LAZILY_ALLOCATED"),
    ];

    let mut label = String::new();
    if flags.is_empty() {
        label.push_str("DEVICE_ONLY");
    }
    if flags.contains(MemoryPropertyFlags::HOST_VISIBLE) {
        label.push_str("HOST_VISIBLE");
    }
    for (flag, suffix) in SUFFIXES {
        if flags.contains(flag) {
            label.push_str(suffix);
        }
    }
    label
}

// Like C's `%#x`: zero has no prefix.
fn alternate_hex(value: u32) -> String {
    if value == 0 {
        "0".to_owned()
    } else {
        format!("{value:#x}")
    }
}

pub fn device_line(index: usize, properties: &DeviceProperties) -> String {
    format!(
        "  {index}: \"{}\" ({}) {}/{} [{:04x}:{:04x}]",
        properties.name,
        device_type_label(properties.device_type),
        properties.api_version(),
        alternate_hex(properties.driver_version),
        properties.vendor_id,
        properties.device_id,
    )
}

pub fn heap_line(index: usize, heap: &MemoryHeap) -> String {
    format!(
        "     Heap {index}: {:#x} {}",
        heap.size,
        heap_flags_label(heap.flags)
    )
}

pub fn memory_type_line(index: usize, memory_type: &MemoryType) -> String {
    format!("       Type {index}: {}", memory_flags_label(memory_type.flags))
}

pub fn queue_family_line(
    index: usize,
    family: &QueueFamilyProperties,
) -> Result<String, ReportError> {
    let capabilities = queue_flags_label(family.flags)
        .map_err(|bit| ReportError::UnknownQueueFlag { family: index, bit })?;
    Ok(format!(
        "     Queue Family {index}: {:2}x {capabilities} timestamps:{}",
        family.queue_count,
        if family.supports_timestamps { "YES" } else { "NO" }
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(vk::PhysicalDeviceType::OTHER, "OTHER")]
    #[case(vk::PhysicalDeviceType::INTEGRATED_GPU, "INTEGRATED_GPU")]
    #[case(vk::PhysicalDeviceType::DISCRETE_GPU, "DISCRETE_GPU")]
    #[case(vk::PhysicalDeviceType::VIRTUAL_GPU, "VIRTUAL_GPU")]
    #[case(vk::PhysicalDeviceType::CPU, "CPU")]
    #[case(vk::PhysicalDeviceType::from_raw(5), "<UNKNOWN>")]
    #[case(vk::PhysicalDeviceType::from_raw(-1), "<UNKNOWN>")]
    fn device_type_labels(#[case] device_type: vk::PhysicalDeviceType, #[case] label: &str) {
        assert_eq!(device_type_label(device_type), label);
    }

    #[rstest]
    #[case(MemoryPropertyFlags::empty(), "DEVICE_ONLY")]
    #[case(MemoryPropertyFlags::HOST_VISIBLE, "HOST_VISIBLE")]
    #[case(
        MemoryPropertyFlags::HOST_VISIBLE | MemoryPropertyFlags::HOST_NON_COHERENT,
        "HOST_VISIBLE NON_COHERENT"
    )]
    #[case(
        MemoryPropertyFlags::HOST_VISIBLE
            | MemoryPropertyFlags::HOST_NON_COHERENT
            | MemoryPropertyFlags::HOST_UNCACHED,
        "HOST_VISIBLE NON_COHERENT UNCACHED"
    )]
    #[case(
        MemoryPropertyFlags::HOST_VISIBLE | MemoryPropertyFlags::HOST_WRITE_COMBINED,
        "HOST_VISIBLE WRITE_COMBINED"
    )]
    #[case(MemoryPropertyFlags::LAZILY_ALLOCATED, " LAZILY_ALLOCATED")]
    fn memory_flag_labels(#[case] flags: MemoryPropertyFlags, #[case] label: &str) {
        assert_eq!(memory_flags_label(flags), label);
    }

    #[rstest]
    #[case(QueueFlags::GRAPHICS | QueueFlags::COMPUTE, "GRAPHICS+COMPUTE")]
    #[case(QueueFlags::DMA, "DMA")]
    #[case(QueueFlags::EXTENDED | QueueFlags::GRAPHICS, "GRAPHICS+EXT")]
    #[case(QueueFlags::all(), "GRAPHICS+COMPUTE+DMA+SPARSE+EXT")]
    #[case(QueueFlags::empty(), "")]
    fn queue_flag_labels(#[case] flags: QueueFlags, #[case] label: &str) {
        assert_eq!(queue_flags_label(flags).as_deref(), Ok(label));
    }

    #[test]
    fn unknown_queue_bit_is_reported() {
        let flags = QueueFlags::GRAPHICS | QueueFlags::from_bits_retain(1 << 4);
        assert_eq!(queue_flags_label(flags), Err(1 << 4));

        let family = QueueFamilyProperties {
            queue_count: 1,
            flags,
            supports_timestamps: false,
        };
        let err = queue_family_line(2, &family).unwrap_err();
        assert!(matches!(
            err,
            ReportError::UnknownQueueFlag { family: 2, bit: 0x10 }
        ));
    }

    #[test]
    fn device_line_layout() {
        let properties = DeviceProperties {
            name: "Fake GPU".to_owned(),
            device_type: vk::PhysicalDeviceType::DISCRETE_GPU,
            api_version: 0x0040_1003,
            driver_version: 0x1_2345,
            vendor_id: 0x10de,
            device_id: 0x42,
        };
        assert_eq!(
            device_line(0, &properties),
            "  0: \"Fake GPU\" (DISCRETE_GPU) 1.1.3/0x12345 [10de:0042]"
        );
    }

    #[test]
    fn zero_driver_version_has_no_prefix() {
        let properties = DeviceProperties {
            name: "cpu".to_owned(),
            device_type: vk::PhysicalDeviceType::CPU,
            api_version: 0,
            driver_version: 0,
            vendor_id: 0,
            device_id: 0,
        };
        assert_eq!(device_line(3, &properties), "  3: \"cpu\" (CPU) 0.0.0/0 [0000:0000]");
    }

    #[test]
    fn heap_and_type_lines() {
        let heap = MemoryHeap {
            size: 0x1_0000_0000,
            flags: MemoryHeapFlags::HOST_LOCAL,
        };
        assert_eq!(heap_line(1, &heap), "     Heap 1: 0x100000000 HOST_LOCAL");

        let heap = MemoryHeap {
            size: 0x800,
            flags: MemoryHeapFlags::empty(),
        };
        assert_eq!(heap_line(0, &heap), "     Heap 0: 0x800 ");

        let memory_type = MemoryType {
            heap_index: 0,
            flags: MemoryPropertyFlags::empty(),
        };
        assert_eq!(memory_type_line(4, &memory_type), "       Type 4: DEVICE_ONLY");
    }

    #[test]
    fn queue_family_line_pads_count() {
        let family = QueueFamilyProperties {
            queue_count: 4,
            flags: QueueFlags::GRAPHICS | QueueFlags::COMPUTE,
            supports_timestamps: true,
        };
        assert_eq!(
            queue_family_line(0, &family).unwrap(),
            "     Queue Family 0:  4x GRAPHICS+COMPUTE timestamps:YES"
        );

        let family = QueueFamilyProperties {
            queue_count: 16,
            flags: QueueFlags::DMA,
            supports_timestamps: false,
        };
        assert_eq!(
            queue_family_line(1, &family).unwrap(),
            "     Queue Family 1: 16x DMA timestamps:NO"
        );
    }
}
