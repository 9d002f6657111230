//! Finance endpoints: dashboard statistics, sales, purchases, expenses.

use crate::models::{
    Expense, ExpensePatch, NewExpense, NewPurchase, NewSale, Purchase, PurchasePatch, Sale,
    SalePatch, StatsResponse,
};

use super::{ApiClient, ApiError, Page};

fn page_query(page: u32) -> Vec<(String, String)> {
    vec![("page".to_string(), page.to_string())]
}

impl ApiClient {
    /// Fetch the aggregated dashboard figures.
    pub async fn stats(&self) -> Result<StatsResponse, ApiError> {
        self.get("stats/", Vec::new()).await
    }

    // ===== Sales =====

    pub async fn sales(&self, page: u32) -> Result<Page<Sale>, ApiError> {
        self.get("sales/", page_query(page)).await
    }

    pub async fn sale(&self, id: i64) -> Result<Sale, ApiError> {
        self.get(&format!("sales/{id}/"), Vec::new()).await
    }

    pub async fn create_sale(&self, new: &NewSale) -> Result<Sale, ApiError> {
        self.post("sales/", new).await
    }

    pub async fn update_sale(&self, id: i64, patch: &SalePatch) -> Result<Sale, ApiError> {
        self.patch(&format!("sales/{id}/"), patch).await
    }

    pub async fn delete_sale(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("sales/{id}/")).await
    }

    // ===== Purchases =====

    pub async fn purchases(&self, page: u32) -> Result<Page<Purchase>, ApiError> {
        self.get("purchases/", page_query(page)).await
    }

    pub async fn purchase(&self, id: i64) -> Result<Purchase, ApiError> {
        self.get(&format!("purchases/{id}/"), Vec::new()).await
    }

    pub async fn create_purchase(&self, new: &NewPurchase) -> Result<Purchase, ApiError> {
        self.post("purchases/", new).await
    }

    pub async fn update_purchase(
        &self,
        id: i64,
        patch: &PurchasePatch,
    ) -> Result<Purchase, ApiError> {
        self.patch(&format!("purchases/{id}/"), patch).await
    }

    pub async fn delete_purchase(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("purchases/{id}/")).await
    }

    // ===== Expenses =====

    pub async fn expenses(&self, page: u32) -> Result<Page<Expense>, ApiError> {
        self.get("expenses/", page_query(page)).await
    }

    pub async fn expense(&self, id: i64) -> Result<Expense, ApiError> {
        self.get(&format!("expenses/{id}/"), Vec::new()).await
    }

    pub async fn create_expense(&self, new: &NewExpense) -> Result<Expense, ApiError> {
        self.post("expenses/", new).await
    }

    pub async fn update_expense(
        &self,
        id: i64,
        patch: &ExpensePatch,
    ) -> Result<Expense, ApiError> {
        self.patch(&format!("expenses/{id}/"), patch).await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("expenses/{id}/")).await
    }
}
