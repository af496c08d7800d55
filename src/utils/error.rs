use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Bucket not found")]
    BucketNotFound,

    #[error("Storage API call failed: {0}")]
    Storage(#[from] google_cloud_gax::error::Error),

    #[error("Failed to build storage client: {message}")]
    ClientSetup { message: String },

    #[error("Failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` exited with {status}: {output}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        output: String,
    },
}

pub type Result<T> = std::result::Result<T, InfraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_not_found_display() {
        assert_eq!(InfraError::BucketNotFound.to_string(), "Bucket not found");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failed_display_includes_output() {
        use std::os::unix::process::ExitStatusExt;

        let err = InfraError::CommandFailed {
            command: "terraform destroy".to_string(),
            status: ExitStatus::from_raw(256),
            output: "Error: something broke".to_string(),
        };

        let rendered = err.to_string();
        assert!(rendered.contains("terraform destroy"));
        assert!(rendered.contains("Error: something broke"));
    }
}
