//! # Login Flow Tests
//!
//! Exercises the public surface of tracker-auth end to end: register a
//! credential, log in, verify the token, resolve the identity.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracker_auth::{
    AuthError, Authenticator, CredentialStore, IdentityResolver, InMemoryCredentialStore,
    PasswordScheme, Principal, ResolveError, SigningSecret, TokenCodec, TokenError,
    TOKEN_VALIDITY,
};
use tracker_core::{CredentialRecord, Email};

struct Harness {
    authenticator: Authenticator,
    resolver: IdentityResolver,
    codec: Arc<TokenCodec>,
}

async fn harness() -> Harness {
    let store = Arc::new(InMemoryCredentialStore::new());
    let passwords = Arc::new(PasswordScheme::with_cost(256, 1, 1).unwrap());
    let codec = Arc::new(TokenCodec::new(
        &SigningSecret::new("login-flow-signing-secret-0123456789").unwrap(),
    ));

    let record = CredentialRecord::new(
        Email::new("auth@user.in").unwrap(),
        passwords.hash("auth_pass").unwrap(),
        "Auth User",
    )
    .unwrap();
    store.save(record).await.unwrap();

    let store: Arc<dyn CredentialStore> = store;
    Harness {
        authenticator: Authenticator::new(Arc::clone(&store), Arc::clone(&codec), passwords),
        resolver: IdentityResolver::new(store),
        codec,
    }
}

#[tokio::test]
async fn login_verify_resolve() {
    let h = harness().await;

    let issued = h
        .authenticator
        .authenticate("auth@user.in", "auth_pass")
        .await
        .unwrap();
    assert!(!issued.token.as_str().is_empty());

    let subject = h.codec.verify(issued.token.as_str()).unwrap();
    assert_eq!(subject, "auth@user.in");

    let identity = h.resolver.resolve(&subject).await.unwrap();
    assert_eq!(identity.subject(), Some("auth@user.in"));
    assert_eq!(identity.display_name, "Auth User");
}

#[tokio::test]
async fn issued_token_lives_two_weeks() {
    let h = harness().await;
    let issued = h
        .authenticator
        .authenticate("auth@user.in", "auth_pass")
        .await
        .unwrap();
    assert_eq!(
        issued.claims.exp - issued.claims.iat,
        TOKEN_VALIDITY.as_secs() as i64
    );

    let expiry = issued.claims.expires_at().unwrap();
    assert_eq!(
        h.codec.verify_at(issued.token.as_str(), expiry),
        Err(TokenError::Expired)
    );
    assert!(h
        .codec
        .verify_at(issued.token.as_str(), expiry - Duration::seconds(1))
        .is_ok());
}

#[tokio::test]
async fn failures_are_indistinguishable() {
    let h = harness().await;
    let cases = [
        ("ghost@user.in", "auth_pass"),
        ("auth@user.in", "wrong_pass"),
        ("auth@user.in", ""),
        ("", "auth_pass"),
    ];
    for (identifier, secret) in cases {
        let err = h
            .authenticator
            .authenticate(identifier, secret)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AuthError::AuthenticationFailed),
            "{identifier:?} / {secret:?} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn resolve_is_strict_where_the_token_is_not() {
    let h = harness().await;
    let orphan = h.codec.mint("deleted@user.in").unwrap();
    assert_eq!(
        h.codec.verify(orphan.token.as_str()).unwrap(),
        "deleted@user.in"
    );
    assert!(matches!(
        h.resolver.resolve("deleted@user.in").await,
        Err(ResolveError::IdentityNotFound(_))
    ));
}

#[tokio::test]
async fn concurrent_logins_are_independent() {
    let h = Arc::new(harness().await);
    let mut handles = Vec::new();
    for i in 0..8 {
        let h = Arc::clone(&h);
        handles.push(tokio::spawn(async move {
            let secret = if i % 2 == 0 { "auth_pass" } else { "bad" };
            h.authenticator.authenticate("auth@user.in", secret).await.is_ok()
        }));
    }
    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap() {
            ok += 1;
        }
    }
    assert_eq!(ok, 4);
}

#[test]
fn minted_token_is_not_valid_forever() {
    let codec = TokenCodec::new(&SigningSecret::new("k").unwrap());
    let issued = codec.mint("auth@user.in").unwrap();
    let far_future = Utc::now() + Duration::days(15);
    assert_eq!(
        codec.verify_at(issued.token.as_str(), far_future),
        Err(TokenError::Expired)
    );
}
