pub mod storage;

pub use storage::{
    assert_storage_bucket_exists, create_storage_bucket, create_storage_bucket_with_labels,
    delete_storage_bucket, empty_storage_bucket, find_storage_bucket_with_label,
    get_storage_object_contents, new_storage_client, new_storage_control_client,
    try_assert_storage_bucket_exists, try_create_storage_bucket,
    try_create_storage_bucket_with_labels, try_delete_storage_bucket, try_empty_storage_bucket,
    try_find_storage_bucket_with_label, try_get_storage_object_contents, try_new_storage_client,
    try_new_storage_control_client, try_write_storage_object, write_storage_object,
};
