use crate::model::OsFamily;
use regex::Regex;
use std::sync::LazyLock;

pub const WINDOWS_PATTERN: &str = r"(?i)\bwindows\b";

/// Substrings of a description that mark a Linux distribution or loader.
pub const LINUX_NAME_FRAGMENTS: &[&str] = &[
    "ubuntu", "debian", "fedora", "arch linux", "archlinux", "manjaro", "mint",
    "opensuse", "suse", "centos", "red hat", "rhel", "gentoo", "kali", "pop!_os",
    "pop_os", "elementary", "zorin", "linux", "grub", "systemd-boot", "shim", "refind",
];

/// Loader file names that only Linux boot chains use.
pub const LINUX_LOADER_SUFFIXES: &[&str] = &[
    "grubx64.efi", "grubia32.efi", "grubaa64.efi", "shimx64.efi", "shimia32.efi",
    "shimaa64.efi", "systemd-bootx64.efi", "vmlinuz", ".elf",
];

static WINDOWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WINDOWS_PATTERN).expect("valid windows pattern"));

pub fn classify(description: &str, path: &str) -> OsFamily {
    if WINDOWS.is_match(description) {
        return OsFamily::Windows;
    }

    let description = description.to_lowercase();
    let path = path.trim().to_lowercase();
    if LINUX_NAME_FRAGMENTS.iter().any(|f| description.contains(f))
        || LINUX_LOADER_SUFFIXES.iter().any(|s| path.ends_with(s))
    {
        return OsFamily::Linux;
    }

    OsFamily::Other
}
