//! Dish API

use shared::client::{ApiResponse, PageData, paths};
use shared::models::CreateDishBody;
use shared::{Dish, DishListParams};

use crate::{ClientError, ClientResult, HttpClient, RequestOptions};

#[derive(Debug, Clone)]
pub struct DishApi {
    http: HttpClient,
}

impl DishApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List dishes; parameters are validated before any request is sent
    pub async fn list(&self, params: &DishListParams) -> ClientResult<ApiResponse<PageData<Dish>>> {
        params.validate().map_err(|errors| ClientError::Entity {
            payload: shared::EntityErrorPayload {
                message: "Invalid dish filter".to_string(),
                errors,
            },
        })?;
        let resp = self
            .http
            .get(
                paths::backend::DISHES,
                RequestOptions::new().query(params.to_query()),
            )
            .await?;
        Ok(resp.payload)
    }

    pub async fn add(&self, body: &CreateDishBody) -> ClientResult<ApiResponse<Dish>> {
        let resp = self
            .http
            .post(paths::backend::DISHES, body, RequestOptions::new())
            .await?;
        Ok(resp.payload)
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<Dish>> {
        let resp = self
            .http
            .get(&format!("{}/{}", paths::backend::DISHES, id), RequestOptions::new())
            .await?;
        Ok(resp.payload)
    }

    pub async fn update(&self, id: i64, body: &CreateDishBody) -> ClientResult<ApiResponse<Dish>> {
        let resp = self
            .http
            .put(
                &format!("{}/{}", paths::backend::DISHES, id),
                body,
                RequestOptions::new(),
            )
            .await?;
        Ok(resp.payload)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<ApiResponse<Dish>> {
        let resp = self
            .http
            .delete(&format!("{}/{}", paths::backend::DISHES, id), RequestOptions::new())
            .await?;
        Ok(resp.payload)
    }

    /// Upload a dish image; returns the stored image URL
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<ApiResponse<String>> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self
            .http
            .request(
                reqwest::Method::POST,
                paths::backend::MEDIA_UPLOAD,
                RequestOptions::new().multipart(form),
            )
            .await?;
        Ok(resp.payload)
    }
}
