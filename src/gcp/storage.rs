use google_cloud_gax::paginator::ItemPaginator as _;
use google_cloud_storage::client::{Storage, StorageControl};
use google_cloud_storage::model::{Bucket, Object};

use crate::utils::error::{InfraError, Result};

/// Creates a Cloud Storage data-plane client from ambient credentials, failing
/// the test on error.
pub async fn new_storage_client() -> Storage {
    try_new_storage_client()
        .await
        .unwrap_or_else(|err| panic!("Failed to create storage client: {}", err))
}

/// Creates a Cloud Storage data-plane client from ambient credentials.
pub async fn try_new_storage_client() -> Result<Storage> {
    Storage::builder()
        .build()
        .await
        .map_err(|e| InfraError::ClientSetup {
            message: e.to_string(),
        })
}

/// Creates a Cloud Storage control-plane client from ambient credentials,
/// failing the test on error.
pub async fn new_storage_control_client() -> StorageControl {
    try_new_storage_control_client()
        .await
        .unwrap_or_else(|err| panic!("Failed to create storage control client: {}", err))
}

/// Creates a Cloud Storage control-plane client from ambient credentials.
pub async fn try_new_storage_control_client() -> Result<StorageControl> {
    StorageControl::builder()
        .build()
        .await
        .map_err(|e| InfraError::ClientSetup {
            message: e.to_string(),
        })
}

/// Finds the name of the bucket in the project carrying label `key=value`,
/// failing the test on error.
pub async fn find_storage_bucket_with_label(project: &str, key: &str, value: &str) -> String {
    try_find_storage_bucket_with_label(project, key, value)
        .await
        .unwrap_or_else(|err| {
            panic!(
                "Failed to find storage bucket with label {}={}: {}",
                key, value, err
            )
        })
}

/// Finds the name of the bucket in the project carrying label `key=value`.
///
/// Scans the bucket listing once and returns the first match in the order the
/// listing API yields buckets; returns [`InfraError::BucketNotFound`] when the
/// listing is exhausted without a match.
pub async fn try_find_storage_bucket_with_label(
    project: &str,
    key: &str,
    value: &str,
) -> Result<String> {
    let client = try_new_storage_control_client().await?;

    let mut buckets = client
        .list_buckets()
        .set_parent(format!("projects/{}", project))
        .by_item();

    while let Some(bucket) = buckets.next().await {
        let bucket = bucket?;
        if bucket_has_label(&bucket, key, value) {
            let name = bucket_short_name(&bucket);
            tracing::info!("Found storage bucket {} with label {}={}", name, key, value);
            return Ok(name);
        }
    }

    Err(InfraError::BucketNotFound)
}

/// Fetches the contents of the object in the given bucket, failing the test
/// on error.
pub async fn get_storage_object_contents(bucket: &str, object: &str) -> Vec<u8> {
    try_get_storage_object_contents(bucket, object)
        .await
        .unwrap_or_else(|err| {
            panic!(
                "Failed to read object {} from bucket {}: {}",
                object, bucket, err
            )
        })
}

/// Fetches the contents of the object in the given bucket.
pub async fn try_get_storage_object_contents(bucket: &str, object: &str) -> Result<Vec<u8>> {
    let client = try_new_storage_client().await?;

    let mut reader = client
        .read_object(bucket_resource_name(bucket), object)
        .send()
        .await?;

    let mut contents = Vec::new();
    while let Some(chunk) = reader.next().await.transpose()? {
        contents.extend_from_slice(&chunk);
    }

    tracing::info!(
        "Read {} bytes from storage bucket {}, object {}",
        contents.len(),
        bucket,
        object
    );
    Ok(contents)
}

/// Writes the contents to the object in the given bucket, failing the test on
/// error.
pub async fn write_storage_object(bucket: &str, object: &str, contents: &[u8]) -> Object {
    try_write_storage_object(bucket, object, contents)
        .await
        .unwrap_or_else(|err| {
            panic!(
                "Failed to write object {} to bucket {}: {}",
                object, bucket, err
            )
        })
}

/// Writes the contents to the object in the given bucket.
pub async fn try_write_storage_object(
    bucket: &str,
    object: &str,
    contents: &[u8],
) -> Result<Object> {
    let client = try_new_storage_client().await?;

    let written = client
        .write_object(
            bucket_resource_name(bucket),
            object,
            bytes::Bytes::copy_from_slice(contents),
        )
        .send_unbuffered()
        .await?;

    tracing::info!(
        "Wrote {} bytes to storage bucket {}, object {}",
        contents.len(),
        bucket,
        object
    );
    Ok(written)
}

/// Creates a storage bucket in the project with the given name, failing the
/// test on error.
pub async fn create_storage_bucket(project: &str, bucket: &str) -> Bucket {
    try_create_storage_bucket(project, bucket)
        .await
        .unwrap_or_else(|err| panic!("Failed to create bucket {}: {}", bucket, err))
}

/// Creates a storage bucket in the project with the given name.
pub async fn try_create_storage_bucket(project: &str, bucket: &str) -> Result<Bucket> {
    tracing::info!("Creating bucket {} in project {}", bucket, project);

    let client = try_new_storage_control_client().await?;

    let created = client
        .create_bucket()
        .set_parent("projects/_")
        .set_bucket_id(bucket)
        .set_bucket(Bucket::new().set_project(format!("projects/{}", project)))
        .send()
        .await?;
    Ok(created)
}

/// Creates a storage bucket in the project with the given name and labels,
/// failing the test on error.
pub async fn create_storage_bucket_with_labels<I, K, V>(
    project: &str,
    bucket: &str,
    labels: I,
) -> Bucket
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    try_create_storage_bucket_with_labels(project, bucket, labels)
        .await
        .unwrap_or_else(|err| panic!("Failed to create bucket {}: {}", bucket, err))
}

/// Creates a storage bucket in the project with the given name and labels.
pub async fn try_create_storage_bucket_with_labels<I, K, V>(
    project: &str,
    bucket: &str,
    labels: I,
) -> Result<Bucket>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    tracing::info!("Creating bucket {} in project {}", bucket, project);

    let client = try_new_storage_control_client().await?;

    let created = client
        .create_bucket()
        .set_parent("projects/_")
        .set_bucket_id(bucket)
        .set_bucket(
            Bucket::new()
                .set_project(format!("projects/{}", project))
                .set_labels(labels),
        )
        .send()
        .await?;
    Ok(created)
}

/// Deletes the storage bucket with the given name, failing the test on error.
pub async fn delete_storage_bucket(name: &str) {
    try_delete_storage_bucket(name)
        .await
        .unwrap_or_else(|err| panic!("Failed to delete bucket {}: {}", name, err));
}

/// Deletes the storage bucket with the given name.
pub async fn try_delete_storage_bucket(name: &str) -> Result<()> {
    tracing::info!("Deleting bucket {}", name);

    let client = try_new_storage_control_client().await?;

    client
        .delete_bucket()
        .set_name(bucket_resource_name(name))
        .send()
        .await?;
    Ok(())
}

/// Deletes every object in the storage bucket, failing the test on error.
pub async fn empty_storage_bucket(name: &str) {
    try_empty_storage_bucket(name)
        .await
        .unwrap_or_else(|err| panic!("Failed to empty bucket {}: {}", name, err));
}

/// Deletes every object in the storage bucket. A bucket must be empty before
/// it can be deleted.
pub async fn try_empty_storage_bucket(name: &str) -> Result<()> {
    tracing::info!("Emptying bucket {}", name);

    let client = try_new_storage_control_client().await?;

    let mut objects = client
        .list_objects()
        .set_parent(bucket_resource_name(name))
        .by_item();

    while let Some(object) = objects.next().await {
        let object = object?;
        client
            .delete_object()
            .set_bucket(bucket_resource_name(name))
            .set_object(object.name.as_str())
            .send()
            .await?;
        tracing::debug!("Deleted object {} from bucket {}", object.name, name);
    }

    Ok(())
}

/// Checks that the storage bucket exists, failing the test if it does not.
pub async fn assert_storage_bucket_exists(name: &str) {
    try_assert_storage_bucket_exists(name)
        .await
        .unwrap_or_else(|err| panic!("Bucket {} does not exist: {}", name, err));
}

/// Checks that the storage bucket exists, returning an error if it does not.
pub async fn try_assert_storage_bucket_exists(name: &str) -> Result<()> {
    let client = try_new_storage_control_client().await?;

    // TODO: map the service's not-found status onto a dedicated error variant
    // once a caller needs to tell it apart from other failures.
    client
        .get_bucket()
        .set_name(bucket_resource_name(name))
        .send()
        .await?;
    Ok(())
}

fn bucket_resource_name(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn bucket_has_label(bucket: &Bucket, key: &str, value: &str) -> bool {
    bucket.labels.get(key).map(String::as_str) == Some(value)
}

fn bucket_short_name(bucket: &Bucket) -> String {
    if !bucket.bucket_id.is_empty() {
        bucket.bucket_id.clone()
    } else {
        bucket.name.rsplit('/').next().unwrap_or_default().to_string()
    }
}
