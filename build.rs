use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Copy display.toml next to the built executable
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    // OUT_DIR is something like target/x86_64-pc-windows-msvc/release/build/rtc-xxx/out
    // We want: target/x86_64-pc-windows-msvc/release/
    let out_path = Path::new(&out_dir);

    println!("cargo:rerun-if-changed=display.toml");
    if let Some(profile_dir) = out_path.ancestors().nth(3) {
        let src = Path::new("display.toml");
        let dst = profile_dir.join("display.toml");

        if src.exists() {
            if let Err(e) = fs::copy(src, &dst) {
                println!("cargo:warning=Failed to copy display.toml: {}", e);
            }
        }
    }
}
