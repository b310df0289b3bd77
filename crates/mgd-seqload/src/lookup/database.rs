//! Lookup tables read straight from MGD

use mgd_common::{MgdError, Result};
use sqlx::PgPool;
use tracing::{debug, info};

use super::{FullCachedLookup, Key, KeyLookup, LookupSet};

/// Logical database keys of the reference id authorities
const PUBMED_LOGICAL_DB_KEY: i64 = 29;
const MEDLINE_LOGICAL_DB_KEY: i64 = 7;
const MGI_LOGICAL_DB_KEY: i64 = 1;

/// MGI type key of references
const REFERENCE_MGI_TYPE_KEY: i64 = 1;

const REFERENCE_BY_LOGICAL_DB: &str = r#"
    SELECT accid, _object_key::bigint
    FROM acc_accession
    WHERE _logicaldb_key = $1
      AND _mgitype_key = $2
"#;

const JNUMBER_REFERENCES: &str = r#"
    SELECT accid, _object_key::bigint
    FROM acc_accession
    WHERE _logicaldb_key = $1
      AND _mgitype_key = $2
      AND prefixpart = 'J:'
"#;

const VOCABULARY_TERMS: &str = r#"
    SELECT t.term, t._term_key::bigint
    FROM voc_term t
    JOIN voc_vocab v ON v._vocab_key = t._vocab_key
    WHERE v.name = $1
"#;

/// Fill every lookup from the MGD database
pub async fn load_from_database(pool: &PgPool) -> Result<LookupSet> {
    let mut set = LookupSet::default();

    let logical_dbs: Vec<(String, Key)> =
        sqlx::query_as("SELECT name, _logicaldb_key::bigint FROM acc_logicaldb")
            .fetch_all(pool)
            .await
            .map_err(|e| database_error("logical_db", e))?;
    set.logical_db.extend(logical_dbs);

    fill_references(pool, &mut set.pubmed, REFERENCE_BY_LOGICAL_DB, PUBMED_LOGICAL_DB_KEY).await?;
    fill_references(pool, &mut set.medline, REFERENCE_BY_LOGICAL_DB, MEDLINE_LOGICAL_DB_KEY).await?;
    fill_references(pool, &mut set.jnumber, JNUMBER_REFERENCES, MGI_LOGICAL_DB_KEY).await?;

    fill_vocabulary(pool, &mut set.seq_type, "Sequence Type").await?;
    fill_vocabulary(pool, &mut set.seq_quality, "Sequence Quality").await?;
    fill_vocabulary(pool, &mut set.seq_status, "Sequence Status").await?;
    fill_vocabulary(pool, &mut set.seq_provider, "Sequence Provider").await?;

    info!(entries = set.total_entries(), "Loaded lookup tables from MGD");
    Ok(set)
}

async fn fill_references(
    pool: &PgPool,
    lookup: &mut FullCachedLookup,
    query: &str,
    logical_db_key: i64,
) -> Result<()> {
    let rows: Vec<(String, Key)> = sqlx::query_as(query)
        .bind(logical_db_key)
        .bind(REFERENCE_MGI_TYPE_KEY)
        .fetch_all(pool)
        .await
        .map_err(|e| database_error(lookup.name(), e))?;

    debug!(lookup = lookup.name(), rows = rows.len(), "Fetched reference ids");
    lookup.extend(rows);
    Ok(())
}

async fn fill_vocabulary(pool: &PgPool, lookup: &mut FullCachedLookup, vocabulary: &str) -> Result<()> {
    let rows: Vec<(String, Key)> = sqlx::query_as(VOCABULARY_TERMS)
        .bind(vocabulary)
        .fetch_all(pool)
        .await
        .map_err(|e| database_error(vocabulary, e))?;

    debug!(vocabulary, rows = rows.len(), "Fetched vocabulary terms");
    lookup.extend(rows);
    Ok(())
}

fn database_error(lookup: &str, error: sqlx::Error) -> MgdError {
    MgdError::lookup_load(format!("{} lookup query failed: {}", lookup, error))
}
