use techcat_core::errors::*;

#[test]
fn missing_credential_carries_env_var() {
    let err = ConfigError::MissingCredential {
        provider: "naming api".into(),
        env_var: "TECHCAT_NAMING_API_KEY".into(),
    };
    assert!(err.to_string().contains("TECHCAT_NAMING_API_KEY"));
}

#[test]
fn naming_timeout_carries_cluster_id() {
    let err = NamingError::Timeout {
        cluster_id: "cluster_0007".into(),
        timeout_secs: 60,
    };
    let msg = err.to_string();
    assert!(msg.contains("cluster_0007"));
    assert!(msg.contains("60"));
}

#[test]
fn dimension_mismatch_carries_values() {
    let err = EmbeddingError::DimensionMismatch {
        expected: 256,
        actual: 384,
    };
    let msg = err.to_string();
    assert!(msg.contains("256"));
    assert!(msg.contains("384"));
}

// --- From impls ---

#[test]
fn config_error_converts_and_is_fatal() {
    let err: TechcatError = ConfigError::MissingFile {
        path: "catalog.json".into(),
    }
    .into();
    assert!(matches!(err, TechcatError::ConfigError(_)));
    assert!(err.is_fatal());
}

#[test]
fn capability_errors_are_not_fatal() {
    let emb: TechcatError = EmbeddingError::InferenceFailed {
        reason: "503".into(),
    }
    .into();
    let naming: TechcatError = NamingError::EmptyName {
        cluster_id: "cluster_0001".into(),
    }
    .into();
    assert!(!emb.is_fatal());
    assert!(!naming.is_fatal());
}

#[test]
fn concurrent_run_is_fatal() {
    let err: TechcatError = ResolutionError::AlreadyRunning.into();
    assert!(err.is_fatal());
}

#[test]
fn serialization_error_converts() {
    let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
    let err: TechcatError = json_err.into();
    assert!(matches!(err, TechcatError::SerializationError(_)));
}

#[test]
fn artifact_error_converts() {
    let err: TechcatError = ArtifactError::NotFound {
        path: "03_clusters.json".into(),
    }
    .into();
    assert!(err.to_string().contains("03_clusters.json"));
}
