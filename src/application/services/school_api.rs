//! Named endpoints of the student management backend.

use std::sync::Arc;

use serde_json::{Value, json};

use super::api_client::ApiClient;
use crate::domain::entities::{HttpMethod, MultipartForm, RequestBody, RequestOptions};
use crate::domain::errors::ApiError;

type ApiResult = Result<Value, ApiError>;

/// Thin endpoint catalogue over a shared [`ApiClient`].
#[derive(Clone)]
pub struct SchoolApi {
    client: Arc<ApiClient>,
}

#[allow(missing_docs, clippy::missing_errors_doc)]
impl SchoolApi {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // Authentication

    pub async fn login(&self, email: &str, password: &str) -> ApiResult {
        self.client
            .post("/auth/login", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn register(&self, payload: &Value) -> ApiResult {
        self.client.post("/auth/register", payload).await
    }

    // Profile

    pub async fn profile(&self) -> ApiResult {
        self.client.get("/profile").await
    }

    pub async fn update_profile(&self, payload: &Value) -> ApiResult {
        self.client.put("/profile", payload).await
    }

    // Courses

    pub async fn courses(&self, page: u32, limit: u32) -> ApiResult {
        self.client
            .get(&format!("/courses?page={page}&limit={limit}"))
            .await
    }

    pub async fn course(&self, id: u64) -> ApiResult {
        self.client.get(&format!("/courses/{id}")).await
    }

    pub async fn create_course(&self, payload: &Value) -> ApiResult {
        self.client.post("/courses", payload).await
    }

    pub async fn update_course(&self, id: u64, payload: &Value) -> ApiResult {
        self.client.put(&format!("/courses/{id}"), payload).await
    }

    pub async fn delete_course(&self, id: u64) -> ApiResult {
        self.client.delete(&format!("/courses/{id}")).await
    }

    // Students

    pub async fn students(&self, page: u32, limit: u32) -> ApiResult {
        self.client
            .get(&format!("/students?page={page}&limit={limit}"))
            .await
    }

    pub async fn student(&self, id: u64) -> ApiResult {
        self.client.get(&format!("/students/{id}")).await
    }

    pub async fn create_student(&self, payload: &Value) -> ApiResult {
        self.client.post("/students", payload).await
    }

    pub async fn update_student(&self, id: u64, payload: &Value) -> ApiResult {
        self.client.put(&format!("/students/{id}"), payload).await
    }

    pub async fn delete_student(&self, id: u64) -> ApiResult {
        self.client.delete(&format!("/students/{id}")).await
    }

    pub async fn update_user_status(&self, user_id: u64, status: &str) -> ApiResult {
        self.client
            .patch(&format!("/users/{user_id}/status"), &json!({ "status": status }))
            .await
    }

    // Enrollments

    pub async fn enroll(&self, student_id: u64, course_id: u64) -> ApiResult {
        self.client
            .post(
                "/enrollments",
                &json!({ "student_id": student_id, "course_id": course_id }),
            )
            .await
    }

    pub async fn student_enrollments(&self, student_id: u64) -> ApiResult {
        self.client
            .get(&format!("/enrollments/by-student/{student_id}"))
            .await
    }

    pub async fn course_enrollments(&self, course_id: u64) -> ApiResult {
        self.client
            .get(&format!("/enrollments/by-course/{course_id}"))
            .await
    }

    pub async fn approve_enrollment(&self, id: u64) -> ApiResult {
        self.client
            .post(&format!("/admin/enrollments/{id}/approve"), &json!({}))
            .await
    }

    pub async fn reject_enrollment(&self, id: u64) -> ApiResult {
        self.client
            .post(&format!("/admin/enrollments/{id}/reject"), &json!({}))
            .await
    }

    // Grades and attendance

    pub async fn record_grade(&self, payload: &Value) -> ApiResult {
        self.client.post("/teacher/grades", payload).await
    }

    pub async fn student_grades(&self, student_id: u64) -> ApiResult {
        self.client
            .get(&format!("/grades/by-student/{student_id}"))
            .await
    }

    pub async fn record_attendance(&self, payload: &Value) -> ApiResult {
        self.client.post("/teacher/attendance", payload).await
    }

    pub async fn student_attendance(&self, student_id: u64) -> ApiResult {
        self.client
            .get(&format!("/attendance/by-student/{student_id}"))
            .await
    }

    // Assignments

    pub async fn assignments_by_course(&self, course_id: u64) -> ApiResult {
        self.client
            .get(&format!("/assignments/course/{course_id}"))
            .await
    }

    pub async fn create_assignment(&self, payload: &Value) -> ApiResult {
        self.client.post("/assignments", payload).await
    }

    /// Uploads a submission; the transport sets the multipart boundary.
    pub async fn submit_assignment(&self, form: MultipartForm) -> ApiResult {
        self.client
            .send(
                HttpMethod::Post,
                "/assignments/submit",
                Some(RequestBody::Multipart(form)),
                RequestOptions::default(),
            )
            .await
    }

    pub async fn grade_submission(&self, submission_id: u64, payload: &Value) -> ApiResult {
        self.client
            .put(&format!("/submissions/{submission_id}/grade"), payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::ScriptedExecutor;

    fn api(executor: &ScriptedExecutor) -> SchoolApi {
        SchoolApi::new(Arc::new(ApiClient::new(Arc::new(executor.clone()))))
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let executor = ScriptedExecutor::new([]);

        api(&executor).login("ada@school.test", "secret").await.unwrap();

        let configs = executor.configs();
        let config = &configs[0];
        assert_eq!(config.method(), HttpMethod::Post);
        assert_eq!(config.path(), "/auth/login");
        assert_eq!(
            config.body(),
            Some(&RequestBody::Json(
                json!({"email": "ada@school.test", "password": "secret"})
            ))
        );
    }

    #[tokio::test]
    async fn test_paged_listing_path() {
        let executor = ScriptedExecutor::new([]);

        api(&executor).courses(2, 25).await.unwrap();

        assert_eq!(executor.configs()[0].path(), "/courses?page=2&limit=25");
    }

    #[tokio::test]
    async fn test_submission_is_multipart_without_json_header() {
        let executor = ScriptedExecutor::new([]);
        let form = MultipartForm::new()
            .text("assignment_id", "12")
            .file("file", "report.pdf", Some("application/pdf".into()), b"%PDF-1.7".to_vec());

        api(&executor).submit_assignment(form).await.unwrap();

        let configs = executor.configs();
        let config = &configs[0];
        assert_eq!(config.header("Content-Type"), None);
        assert!(matches!(config.body(), Some(RequestBody::Multipart(_))));
    }

    #[tokio::test]
    async fn test_status_update_uses_patch() {
        let executor = ScriptedExecutor::new([]);

        api(&executor).update_user_status(9, "inactive").await.unwrap();

        let configs = executor.configs();
        let config = &configs[0];
        assert_eq!(config.method(), HttpMethod::Patch);
        assert_eq!(config.path(), "/users/9/status");
    }
}
