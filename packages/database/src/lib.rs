#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Database connection and schema bootstrap for the census dashboard.
//!
//! Production runs against Postgres; local and test setups use a `SQLite`
//! file. Both go through `switchy_database`, and the statistics queries use
//! raw SQL via `query_raw_params()`.

pub mod db;

use switchy_database::Database;

/// Census tables, in dependency order. Every fact table is keyed by the
/// `(Year, StatFP, CountyFP, Tract)` geographic unit.
const SCHEMA: [(&str, &str); 5] = [
    (
        "Geoid_info",
        "CREATE TABLE IF NOT EXISTS Geoid_info (
            Year INTEGER NOT NULL,
            StatFP VARCHAR(10) NOT NULL,
            CountyFP VARCHAR(10) NOT NULL,
            Tract VARCHAR(20) NOT NULL,
            PRIMARY KEY (Year, StatFP, CountyFP, Tract)
        )",
    ),
    (
        "Population_Demographics",
        "CREATE TABLE IF NOT EXISTS Population_Demographics (
            Year INTEGER NOT NULL,
            StatFP VARCHAR(10) NOT NULL,
            CountyFP VARCHAR(10) NOT NULL,
            Tract VARCHAR(20) NOT NULL,
            MedianAge DOUBLE PRECISION,
            White INTEGER,
            BlackorAfricanAmerican INTEGER,
            HispanicorLatino INTEGER,
            Asian INTEGER,
            AmericanIndian INTEGER,
            NativeHawaiian INTEGER,
            TotalMalePopulation INTEGER,
            TotalFemalePopulation INTEGER,
            WithDisability INTEGER,
            WithHealthInsurance INTEGER,
            PRIMARY KEY (Year, StatFP, CountyFP, Tract),
            FOREIGN KEY (Year, StatFP, CountyFP, Tract)
                REFERENCES Geoid_info (Year, StatFP, CountyFP, Tract)
        )",
    ),
    (
        "Socioeconomic_Factors",
        "CREATE TABLE IF NOT EXISTS Socioeconomic_Factors (
            Year INTEGER NOT NULL,
            StatFP VARCHAR(10) NOT NULL,
            CountyFP VARCHAR(10) NOT NULL,
            Tract VARCHAR(20) NOT NULL,
            MedianHouseholdIncome DOUBLE PRECISION,
            PerCapitaIncome DOUBLE PRECISION,
            PeopleBelowPovertyLine INTEGER,
            ChildPovertyRate DOUBLE PRECISION,
            HighSchoolGraduate INTEGER,
            SomeCollege INTEGER,
            BachelorsDegreeorHigher INTEGER,
            InLaborForce INTEGER,
            CivilianLaborForce INTEGER,
            Employed INTEGER,
            Unemployed INTEGER,
            NotinLaborForce INTEGER,
            PRIMARY KEY (Year, StatFP, CountyFP, Tract),
            FOREIGN KEY (Year, StatFP, CountyFP, Tract)
                REFERENCES Geoid_info (Year, StatFP, CountyFP, Tract)
        )",
    ),
    (
        "Housing_Data",
        "CREATE TABLE IF NOT EXISTS Housing_Data (
            Year INTEGER NOT NULL,
            StatFP VARCHAR(10) NOT NULL,
            CountyFP VARCHAR(10) NOT NULL,
            Tract VARCHAR(20) NOT NULL,
            VacantHousingUnits INTEGER,
            OwnerOccupiedUnits INTEGER,
            RenterOccupiedUnits INTEGER,
            MedianHomeValue DOUBLE PRECISION,
            MedianGrossRent DOUBLE PRECISION,
            HouseholdSize DOUBLE PRECISION,
            PRIMARY KEY (Year, StatFP, CountyFP, Tract),
            FOREIGN KEY (Year, StatFP, CountyFP, Tract)
                REFERENCES Geoid_info (Year, StatFP, CountyFP, Tract)
        )",
    ),
    (
        "Transportation_Mobility",
        "CREATE TABLE IF NOT EXISTS Transportation_Mobility (
            Year INTEGER NOT NULL,
            StatFP VARCHAR(10) NOT NULL,
            CountyFP VARCHAR(10) NOT NULL,
            Tract VARCHAR(20) NOT NULL,
            WorkedatHome INTEGER,
            PublicTransportation INTEGER,
            AverageTravelTimetoWork DOUBLE PRECISION,
            NoVehicleAvailable INTEGER,
            OneVehicleAvailable INTEGER,
            TwoVehiclesAvailable INTEGER,
            ThreeorMoreVehiclesAvailable INTEGER,
            CarOwnershipperHousehold DOUBLE PRECISION,
            PRIMARY KEY (Year, StatFP, CountyFP, Tract),
            FOREIGN KEY (Year, StatFP, CountyFP, Tract)
                REFERENCES Geoid_info (Year, StatFP, CountyFP, Tract)
        )",
    ),
];

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// The database could not be reached or opened.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of what went wrong.
        message: String,
    },

    /// Filesystem error while preparing a `SQLite` file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Creates every census table that does not exist yet.
///
/// # Errors
///
/// Returns [`DbError`] if any statement fails.
pub async fn ensure_schema(db: &dyn Database) -> Result<(), DbError> {
    for (table, ddl) in SCHEMA {
        log::debug!("Ensuring table {table}");
        db.exec_raw(ddl).await?;
    }
    log::info!("Census schema ready ({} tables)", SCHEMA.len());
    Ok(())
}
