#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // Version info only: the repository ships no icon resource
    let mut res = WindowsResource::new();
    res.set("FileDescription", "dashlogger CLI")
        .set("ProductName", "dashlogger")
        .set("OriginalFilename", "dashlogger.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed version resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
