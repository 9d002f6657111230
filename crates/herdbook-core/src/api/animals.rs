//! Livestock endpoints: animal types, animals, breeder notes, and
//! pregnancy records.

use chrono::NaiveDate;

use crate::models::{
    Animal, AnimalPatch, AnimalType, AnimalTypePatch, BreederNote, DeletionCheck, Gender,
    NewAnimal, NewAnimalType, NewNote, NewPregnancy, NotePatch, PregnancyPatch, PregnancyStatus,
    PregnancyTracking,
};

use super::pagination::MaybePaged;
use super::{ApiClient, ApiError, Page};

/// Status filter for animal lists. The API defaults to living animals;
/// `All` suppresses the parameter so every status comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Existing,
    Sold,
    Dead,
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Existing => write!(f, "existing"),
            StatusFilter::Sold => write!(f, "sold"),
            StatusFilter::Dead => write!(f, "dead"),
        }
    }
}

/// Query filters for `animals/`. `None` fields are omitted from the query
/// string; an unset `status` is sent as `status=existing`.
#[derive(Debug, Clone, Default)]
pub struct AnimalFilters {
    pub animal_type: Option<i64>,
    pub gender: Option<Gender>,
    pub status: Option<StatusFilter>,
    pub search: Option<String>,
    pub is_pregnant: Option<bool>,
    pub has_active_pregnancy: Option<bool>,
    pub pregnancy_status: Option<PregnancyStatus>,
    pub birth_date_min: Option<NaiveDate>,
    pub birth_date_max: Option<NaiveDate>,
    pub weight_min: Option<String>,
    pub weight_max: Option<String>,
    pub head_price_min: Option<String>,
    pub head_price_max: Option<String>,
    pub color: Option<String>,
    pub animal_number: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<u32>,
}

impl AnimalFilters {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();

        if let Some(animal_type) = self.animal_type {
            params.push(("animal_type".to_string(), animal_type.to_string()));
        }
        if let Some(gender) = self.gender {
            params.push(("gender".to_string(), gender.to_string()));
        }
        match self.status {
            None => params.push(("status".to_string(), StatusFilter::Existing.to_string())),
            Some(StatusFilter::All) => {}
            Some(status) => params.push(("status".to_string(), status.to_string())),
        }
        if let Some(ref search) = self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(is_pregnant) = self.is_pregnant {
            params.push(("is_pregnant".to_string(), is_pregnant.to_string()));
        }
        if let Some(active) = self.has_active_pregnancy {
            params.push(("has_active_pregnancy".to_string(), active.to_string()));
        }
        if let Some(status) = self.pregnancy_status {
            params.push(("pregnancy_status".to_string(), status.to_string()));
        }
        if let Some(min) = self.birth_date_min {
            params.push(("birth_date_min".to_string(), min.to_string()));
        }
        if let Some(max) = self.birth_date_max {
            params.push(("birth_date_max".to_string(), max.to_string()));
        }
        if let Some(ref min) = self.weight_min {
            params.push(("weight_min".to_string(), min.clone()));
        }
        if let Some(ref max) = self.weight_max {
            params.push(("weight_max".to_string(), max.clone()));
        }
        if let Some(ref min) = self.head_price_min {
            params.push(("head_price_min".to_string(), min.clone()));
        }
        if let Some(ref max) = self.head_price_max {
            params.push(("head_price_max".to_string(), max.clone()));
        }
        if let Some(ref color) = self.color {
            params.push(("color".to_string(), color.clone()));
        }
        if let Some(ref number) = self.animal_number {
            params.push(("animal_number".to_string(), number.clone()));
        }
        if let Some(ref ordering) = self.ordering {
            params.push(("ordering".to_string(), ordering.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

impl ApiClient {
    // ===== Animal types =====

    /// Fetch the animal-type taxonomy. The endpoint answers with either a
    /// page envelope or a bare array depending on server configuration.
    pub async fn animal_types(&self) -> Result<Vec<AnimalType>, ApiError> {
        let response: MaybePaged<AnimalType> = self.get("types/", Vec::new()).await?;
        Ok(response.into_results())
    }

    pub async fn create_animal_type(&self, new: &NewAnimalType) -> Result<AnimalType, ApiError> {
        self.post("types/", new).await
    }

    pub async fn update_animal_type(
        &self,
        id: i64,
        patch: &AnimalTypePatch,
    ) -> Result<AnimalType, ApiError> {
        self.patch(&format!("types/{id}/"), patch).await
    }

    pub async fn delete_animal_type(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("types/{id}/")).await
    }

    // ===== Animals =====

    /// Fetch one page of animals matching the filters (1-based page).
    pub async fn animals(
        &self,
        filters: &AnimalFilters,
        page: u32,
    ) -> Result<Page<Animal>, ApiError> {
        let mut query = filters.to_query();
        query.push(("page".to_string(), page.to_string()));
        self.get("animals/", query).await
    }

    /// Fetch every animal matching the filters in one call
    /// (`no_pagination=true` returns a bare array).
    pub async fn all_animals(&self, filters: &AnimalFilters) -> Result<Vec<Animal>, ApiError> {
        let mut query = filters.to_query();
        query.push(("no_pagination".to_string(), "true".to_string()));
        self.get("animals/", query).await
    }

    pub async fn animal(&self, id: i64) -> Result<Animal, ApiError> {
        self.get(&format!("animals/{id}/"), Vec::new()).await
    }

    pub async fn create_animal(&self, new: &NewAnimal) -> Result<Animal, ApiError> {
        self.post("animals/", new).await
    }

    pub async fn update_animal(&self, id: i64, patch: &AnimalPatch) -> Result<Animal, ApiError> {
        self.patch(&format!("animals/{id}/"), patch).await
    }

    pub async fn delete_animal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("animals/{id}/")).await
    }

    /// Ask the server whether other records still reference this animal.
    pub async fn check_deletion(&self, id: i64) -> Result<DeletionCheck, ApiError> {
        self.get(&format!("animals/{id}/check_deletion/"), Vec::new())
            .await
    }

    pub async fn offspring(&self, id: i64) -> Result<Vec<Animal>, ApiError> {
        self.get(&format!("animals/{id}/offspring/"), Vec::new())
            .await
    }

    // ===== Breeder notes =====

    pub async fn notes(&self, animal_id: i64) -> Result<Vec<BreederNote>, ApiError> {
        let query = vec![("animal".to_string(), animal_id.to_string())];
        let response: MaybePaged<BreederNote> = self.get("notes/", query).await?;
        Ok(response.into_results())
    }

    pub async fn create_note(&self, new: &NewNote) -> Result<BreederNote, ApiError> {
        self.post("notes/", new).await
    }

    pub async fn update_note(&self, id: i64, patch: &NotePatch) -> Result<BreederNote, ApiError> {
        self.patch(&format!("notes/{id}/"), patch).await
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("notes/{id}/")).await
    }

    // ===== Pregnancy records =====

    pub async fn pregnancy_records(
        &self,
        animal_id: i64,
    ) -> Result<Vec<PregnancyTracking>, ApiError> {
        let query = vec![("animal".to_string(), animal_id.to_string())];
        let response: MaybePaged<PregnancyTracking> = self.get("pregnancy/", query).await?;
        Ok(response.into_results())
    }

    pub async fn create_pregnancy_record(
        &self,
        new: &NewPregnancy,
    ) -> Result<PregnancyTracking, ApiError> {
        self.post("pregnancy/", new).await
    }

    pub async fn update_pregnancy_record(
        &self,
        id: i64,
        patch: &PregnancyPatch,
    ) -> Result<PregnancyTracking, ApiError> {
        self.patch(&format!("pregnancy/{id}/"), patch).await
    }

    pub async fn delete_pregnancy_record(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("pregnancy/{id}/")).await
    }
}
