//
//  marketplace-sdk
//  services/companies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Companies (vendors) API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::UploadFile;
use crate::api::{
    ApiClient, ApiError, ApiResult, DomainError, ErrorCode, HttpError, RequestOptions,
    StatusTranslation,
};

/// A vendor's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub is_professional: bool,
    #[serde(default)]
    pub image: Option<super::cms::Image>,
}

/// Outcome of one uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUploadResult {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Company endpoints.
pub struct CompanyService<'a> {
    client: &'a ApiClient,
}

impl<'a> CompanyService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn company(&self, company_id: u64) -> ApiResult<Company> {
        self.client
            .get(&format!("companies/{}", company_id))
            .await
            .on_status(404, |http| not_found(company_id, http))
            .or_default_status_errors()
    }

    /// Uploads registration documents for a company.
    ///
    /// Returns one result per field name. A marketplace that has vendor
    /// registration switched off answers with [`ApiError::FeatureNotEnabled`].
    pub async fn upload_registration_files(
        &self,
        company_id: u64,
        files: Vec<UploadFile>,
    ) -> ApiResult<BTreeMap<String, FileUploadResult>> {
        self.client.must_be_authenticated()?;
        if files.is_empty() {
            return Err(ApiError::InvalidRequest("No file to upload".to_string()));
        }

        let parts = files.into_iter().map(UploadFile::into_part).collect();
        let results: BTreeMap<String, FileUploadResult> = self
            .client
            .post(
                &format!("companies/{}/files", company_id),
                RequestOptions::new().multipart(parts),
            )
            .await
            .on_status(404, |http| not_found(company_id, http))
            .or_default_status_errors()?;

        for (field, result) in results.iter().filter(|(_, r)| !r.success) {
            tracing::warn!(
                "Upload of {} failed: {}",
                field,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(results)
    }
}

fn not_found(company_id: u64, http: HttpError) -> ApiError {
    DomainError::new(ErrorCode::CompanyNotFound, "Company not found")
        .with_context("companyId", company_id)
        .caused_by(http)
        .into()
}
