use sqlx::PgPool;
use tracing::debug;

use super::SoknadStore;
use crate::domain::SoknadRecord;
use crate::error::ServiceResult;

/// PostgreSQL-backed søknad snapshot
#[derive(Clone)]
pub struct PostgresSoknadRepository {
    pool: PgPool,
}

impl PostgresSoknadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Health check
    pub async fn health_check(&self) -> ServiceResult<bool> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(true)
    }

    pub async fn find_by_id(&self, soknad_id: &str) -> ServiceResult<Option<SoknadRecord>> {
        let record = sqlx::query_as::<_, SoknadRecord>(
            r#"
            SELECT soknad_id, sykmelding_id, pasient_fnr, orgnummer, tom, sendt_dato, soknad
            FROM soknad
            WHERE soknad_id = $1
            "#,
        )
        .bind(soknad_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// All søknader stored for an employer, most recent period first
    pub async fn find_by_orgnummer(&self, orgnummer: &str) -> ServiceResult<Vec<SoknadRecord>> {
        let records = sqlx::query_as::<_, SoknadRecord>(
            r#"
            SELECT soknad_id, sykmelding_id, pasient_fnr, orgnummer, tom, sendt_dato, soknad
            FROM soknad
            WHERE orgnummer = $1
            ORDER BY tom DESC, soknad_id
            "#,
        )
        .bind(orgnummer)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

#[async_trait::async_trait]
impl SoknadStore for PostgresSoknadRepository {
    async fn upsert_soknad(&self, record: &SoknadRecord) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO soknad (
                soknad_id, sykmelding_id, pasient_fnr, orgnummer, tom, sendt_dato, soknad, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (soknad_id) DO UPDATE SET
                sykmelding_id = EXCLUDED.sykmelding_id,
                pasient_fnr = EXCLUDED.pasient_fnr,
                orgnummer = EXCLUDED.orgnummer,
                tom = EXCLUDED.tom,
                sendt_dato = EXCLUDED.sendt_dato,
                soknad = EXCLUDED.soknad,
                updated_at = NOW()
            "#,
        )
        .bind(&record.soknad_id)
        .bind(&record.sykmelding_id)
        .bind(&record.pasient_fnr)
        .bind(&record.orgnummer)
        .bind(record.tom)
        .bind(record.sendt_dato)
        .bind(&record.soknad)
        .execute(&self.pool)
        .await?;

        debug!(soknad_id = %record.soknad_id, "Upserted søknad");
        Ok(())
    }

    async fn delete_soknad(&self, soknad_id: &str) -> ServiceResult<()> {
        let result = sqlx::query("DELETE FROM soknad WHERE soknad_id = $1")
            .bind(soknad_id)
            .execute(&self.pool)
            .await?;

        debug!(
            soknad_id = %soknad_id,
            rows_affected = result.rows_affected(),
            "Deleted søknad"
        );
        Ok(())
    }
}
