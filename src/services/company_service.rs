use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::company::Company;
use crate::models::employee::Employee;

#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
}

impl CompanyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, company_id: Uuid) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Company {} not found", company_id)))?;
        Ok(company)
    }

    pub async fn list_employees(&self, company_id: Uuid) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE company_id = $1 ORDER BY hire_date",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }
}
