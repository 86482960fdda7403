use crate::types::RecordDescription;

/// 事件类型名后缀
pub const EVENT_SUFFIX: &str = "Event";

/// 是否保留该结构体: 导出类型 (首字母大写) 或以 `Event` 结尾
pub fn is_kept(record: &RecordDescription) -> bool {
    is_kept_name(&record.name)
}

pub fn is_kept_name(name: &str) -> bool {
    is_exported(name) || name.ends_with(EVENT_SUFFIX)
}

/// Go 导出规则: 首字符为 Unicode 大写字母
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_names_are_kept() {
        assert!(is_kept_name("DeviceInfo"));
        assert!(is_kept_name("ClientKVMSessionRequestedEvent"));
        assert!(is_kept_name("Ärger"));
    }

    #[test]
    fn test_unexported_event_suffix_is_kept() {
        assert!(is_kept_name("internalEvent"));
        assert!(is_kept_name("deviceCreatedEvent"));
    }

    #[test]
    fn test_unexported_without_suffix_is_dropped() {
        assert!(!is_kept_name("lowerCaseNoSuffix"));
        assert!(!is_kept_name("eventPayload"));
        assert!(!is_kept_name("_Hidden"));
        assert!(!is_kept_name(""));
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert!(!is_kept_name("deviceEVENT"));
        assert!(!is_kept_name("deviceevent"));
    }
}
