use base64::{engine::general_purpose, Engine as _};
use eve_sso_pkce::api::pkce::{generate_code_challenge, CodeChallenge, CodeVerifier};
use sha2::{Digest, Sha256};

#[test]
fn challenge_is_sha256_of_verifier_text() {
    for _ in 0..20 {
        let (verifier, challenge) = generate_code_challenge();
        let hash = Sha256::digest(verifier.as_str().as_bytes());
        let expected = general_purpose::URL_SAFE_NO_PAD.encode(hash);
        assert_eq!(challenge.as_str(), expected);
        assert!(challenge.matches(&verifier));
        assert!(!challenge.as_str().ends_with('='));
    }
}

#[test]
fn verifier_and_challenge_decode_to_32_bytes() {
    let (verifier, challenge) = generate_code_challenge();
    assert_eq!(verifier.decode().expect("decode verifier").len(), 32);
    // padded encoding of 32 bytes
    assert_eq!(verifier.as_str().len(), 44);
    let digest = general_purpose::URL_SAFE_NO_PAD
        .decode(challenge.as_str())
        .expect("decode challenge");
    assert_eq!(digest.len(), 32);
}

#[test]
fn verifiers_are_url_safe_and_unique() {
    let (a, _) = generate_code_challenge();
    let (b, _) = generate_code_challenge();
    assert_ne!(a, b);
    assert!(a
        .as_str()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='));
}

#[test]
fn known_vector_from_rfc7636() {
    let verifier = CodeVerifier::new("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    let challenge = CodeChallenge::from_verifier(&verifier);
    assert_eq!(challenge.as_str(), "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn challenge_does_not_match_other_verifier() {
    let (_, challenge) = generate_code_challenge();
    let (other, _) = generate_code_challenge();
    assert!(!challenge.matches(&other));
}

#[test]
fn verifier_debug_hides_value() {
    let (verifier, _) = generate_code_challenge();
    let dbg = format!("{:?}", verifier);
    assert!(!dbg.contains(verifier.as_str()));
}
