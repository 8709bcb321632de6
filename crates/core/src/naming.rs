//! Result artifact naming convention.
//!
//! The backend writes generated artifacts into a results directory using
//! deterministic names derived from the job id. The client never lists
//! the directory; it reconstructs paths from the convention.

/// Path of the redesigned room image for a job.
///
/// Convention: `{results_dir}/{job_id}.png`
///
/// # Examples
///
/// ```
/// use furnish_core::naming::result_image_path;
///
/// assert_eq!(result_image_path("results", "42"), "results/42.png");
/// ```
pub fn result_image_path(results_dir: &str, job_id: &str) -> String {
    format!("{}/{}.png", results_dir.trim_end_matches('/'), job_id)
}

/// Path of a single furniture item image for a job.
///
/// Convention: `{results_dir}/{job_id}_furniture_{furniture_id}.jpg`
///
/// # Examples
///
/// ```
/// use furnish_core::naming::furniture_image_path;
///
/// assert_eq!(
///     furniture_image_path("results", "42", "sofa-3"),
///     "results/42_furniture_sofa-3.jpg",
/// );
/// ```
pub fn furniture_image_path(results_dir: &str, job_id: &str, furniture_id: &str) -> String {
    format!(
        "{}/{}_furniture_{}.jpg",
        results_dir.trim_end_matches('/'),
        job_id,
        furniture_id,
    )
}

/// Map a furniture-id list to image paths, preserving input order.
pub fn furniture_image_paths(
    results_dir: &str,
    job_id: &str,
    furniture_ids: &[String],
) -> Vec<String> {
    furniture_ids
        .iter()
        .map(|id| furniture_image_path(results_dir, job_id, id))
        .collect()
}
