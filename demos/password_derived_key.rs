//! Example: Wrapping an application key under a password
use kekwrap::prelude::*;
use kekwrap::utils;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let password = b"correct horse battery staple";
    let app_key = utils::random_bytes(32)?;

    let wrapper = KeyWrapper::new(KeyDerivationParams::moderate())?;
    let blob = wrapper.wrap(password, &app_key)?;
    println!("Wrapped {} bytes into a {}-byte blob", app_key.len(), blob.len());
    println!("Stored form: {}", blob.to_base64());

    let recovered = wrapper.unwrap(password, blob.as_bytes())?;
    assert!(recovered == &app_key[..]);

    match wrapper.unwrap(b"not the password", blob.as_bytes()) {
        Err(KeyWrapError::AuthenticationFailed) => println!("Wrong password rejected."),
        other => return Err(format!("unexpected result: {:?}", other).into()),
    }

    let rotated = wrapper.rewrap(password, b"a new passphrase", blob.as_bytes())?;
    assert!(wrapper.verify_password(b"a new passphrase", rotated.as_bytes())?);
    println!("Password rotated; application key unchanged.");
    Ok(())
}
