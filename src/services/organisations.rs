//
//  marketplace-sdk
//  services/organisations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organisations API (B2B accounts).
//!
//! Reading an organisation or its members requires a credential belonging to
//! one of its users. Registration is open: it creates the organisation along
//! with its first administrator.

use serde::{Deserialize, Serialize};

use super::UploadFile;
use crate::api::{
    path_segment, ApiClient, ApiError, ApiResult, DomainError, ErrorCode, HttpError, Part,
    RequestOptions, StatusTranslation,
};

/// Review state of an organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganisationStatus {
    Pending,
    Approved,
    Disapproved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationAddress {
    pub address: String,
    #[serde(default)]
    pub additional_address: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    pub id: String,
    pub name: String,
    pub status: OrganisationStatus,
    #[serde(default)]
    pub siret: String,
    #[serde(default)]
    pub vat_number: String,
    #[serde(default)]
    pub business_name: String,
    pub address: OrganisationAddress,
    #[serde(default)]
    pub shipping_address: Option<OrganisationAddress>,
}

/// A member of an organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationUser {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// First administrator created with the organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationAdministrator {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Everything needed to register an organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationRegistration {
    pub name: String,
    pub siret: String,
    pub vat_number: String,
    pub business_name: String,
    pub address: OrganisationAddress,
    pub administrator: OrganisationAdministrator,
}

/// What registration hands back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredOrganisation {
    pub id: String,
    pub user_id: u64,
}

/// Organisation endpoints.
pub struct OrganisationService<'a> {
    client: &'a ApiClient,
}

impl<'a> OrganisationService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// - [`ErrorCode::OrganisationAccessDenied`] when the user is not a member
    /// - [`ErrorCode::OrganisationNotFound`] for an unknown id
    pub async fn organisation(&self, organisation_id: &str) -> ApiResult<Organisation> {
        self.client.must_be_authenticated()?;
        self.client
            .get(&format!("organisations/{}", path_segment(organisation_id)?))
            .await
            .on_status(403, |http| access_denied(organisation_id, http))
            .on_status(404, |http| not_found(organisation_id, http))
            .or_default_status_errors()
    }

    pub async fn users(&self, organisation_id: &str) -> ApiResult<Vec<OrganisationUser>> {
        self.client.must_be_authenticated()?;
        self.client
            .get(&format!("organisations/{}/users", path_segment(organisation_id)?))
            .await
            .on_status(403, |http| access_denied(organisation_id, http))
            .on_status(404, |http| not_found(organisation_id, http))
            .or_default_status_errors()
    }

    /// Registers an organisation with its supporting documents.
    ///
    /// Sent as `multipart/form-data`: the registration itself is a JSON text
    /// part named `organisation`, each file goes under its own field.
    pub async fn register(
        &self,
        registration: &OrganisationRegistration,
        files: Vec<UploadFile>,
    ) -> ApiResult<RegisteredOrganisation> {
        let payload = serde_json::to_string(registration)
            .map_err(|e| ApiError::InvalidRequest(format!("Unserializable registration: {}", e)))?;
        let mut parts = vec![Part::text("organisation", payload)];
        parts.extend(files.into_iter().map(UploadFile::into_part));

        self.client
            .post("organisations/register", RequestOptions::new().multipart(parts))
            .await
            .or_default_status_errors()
    }
}

fn access_denied(organisation_id: &str, http: HttpError) -> ApiError {
    DomainError::new(
        ErrorCode::OrganisationAccessDenied,
        "You are not a member of this organisation",
    )
    .with_context("organisationId", organisation_id)
    .caused_by(http)
    .into()
}

fn not_found(organisation_id: &str, http: HttpError) -> ApiError {
    DomainError::new(ErrorCode::OrganisationNotFound, "Organisation not found")
        .with_context("organisationId", organisation_id)
        .caused_by(http)
        .into()
}
