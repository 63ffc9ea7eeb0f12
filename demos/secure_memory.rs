//! Example: Handling unwrapped key material
use kekwrap::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let wrapper = KeyWrapper::new(KeyDerivationParams::interactive())?;
    let blob = wrapper.wrap(b"password", b"applicationKey")?;

    let mut app_key = wrapper.unwrap(b"password", blob.as_bytes())?;
    // Debug output never shows the bytes
    println!("Unwrapped: {:?}", app_key);

    app_key.clear();
    assert!(app_key.is_empty());
    println!("Key material wiped; the rest is zeroized on drop.");
    Ok(())
}
