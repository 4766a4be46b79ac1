use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TA_LIB_PATH");

    // Only the `talib` backend needs the C library
    if env::var_os("CARGO_FEATURE_TALIB").is_none() {
        return;
    }

    // Link with TA-Lib - note the hyphen in the library name
    println!("cargo:rustc-link-lib=ta-lib");

    let ta_lib_path = env::var("TA_LIB_PATH").unwrap_or_else(|_| "/usr/lib".to_string());
    println!("cargo:rustc-link-search={}", ta_lib_path);

    // If TA-Lib is installed in a non-standard location, tell the loader where to find it
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "linux" || target_os == "macos" {
        println!("cargo:rustc-link-arg=-Wl,-rpath,{}", ta_lib_path);
    }
}
