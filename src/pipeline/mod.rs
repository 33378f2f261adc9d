//! Pipeline module
//!
//! Sequential extract-transform-load over one [`Session`].
//!
//! # Overview
//!
//! The pipeline module provides:
//! - `Pipeline::process_song_data` - song metadata into `songs` and `artists`
//! - `Pipeline::process_log_data` - events into `users`, `time` and `songplays`
//! - `Pipeline::run` - both stages in order, stopping at the first error
//! - `PipelineReport` - per-table write summaries

mod types;

pub use types::PipelineReport;

use crate::error::Result;
use crate::schema::{log_record_schema, song_record_schema};
use crate::session::Session;
use crate::transform;
use crate::types::TableSpec;
use std::time::Instant;
use tracing::info;

/// Runs the song and event stages against a session
pub struct Pipeline<'a> {
    session: &'a Session,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline over `session`
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Run both stages, songs first
    pub async fn run(&self) -> Result<PipelineReport> {
        let start = Instant::now();
        let mut report = PipelineReport::new();

        self.process_song_data(&mut report).await?;
        self.process_log_data(&mut report).await?;

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            tables = report.tables.len(),
            rows = report.rows_written(),
            files = report.files_written(),
            duration_ms = report.duration_ms,
            "Pipeline finished"
        );
        Ok(report)
    }

    /// Read song metadata and write the `songs` and `artists` tables
    pub async fn process_song_data(&self, report: &mut PipelineReport) -> Result<()> {
        let config = self.session.config();
        let songs = self
            .session
            .source()
            .read(&config.song_data, &song_record_schema())
            .await?;
        report.song_records = songs.num_rows();

        let songs_table = transform::songs_table(&songs)?;
        let artists_table = transform::artists_table(&songs)?;

        let writer = self.session.writer();
        report.add_table(writer.write(&TableSpec::SONGS, &songs_table).await?);
        report.add_table(writer.write(&TableSpec::ARTISTS, &artists_table).await?);
        Ok(())
    }

    /// Read event logs and write the `users`, `time` and `songplays` tables
    ///
    /// The song side of the `songplays` join is read from
    /// `songplay_song_data`, independently of the song stage.
    pub async fn process_log_data(&self, report: &mut PipelineReport) -> Result<()> {
        let config = self.session.config();
        let source = self.session.source();

        let events = source.read(&config.log_data, &log_record_schema()).await?;
        report.log_records = events.num_rows();

        let plays = transform::song_plays(&events)?;
        report.song_plays = plays.num_rows();
        info!(
            events = events.num_rows(),
            plays = plays.num_rows(),
            "Filtered playback events"
        );

        let users = transform::users_table(&plays)?;
        let plays = transform::with_timestamps(&plays)?;
        let time = transform::time_table(&plays)?;

        let catalog = source
            .read(&config.songplay_song_data, &song_record_schema())
            .await?;
        let songplays = transform::songplays_table(&plays, &catalog)?;

        let writer = self.session.writer();
        report.add_table(writer.write(&TableSpec::USERS, &users).await?);
        report.add_table(writer.write(&TableSpec::TIME, &time).await?);
        report.add_table(writer.write(&TableSpec::SONGPLAYS, &songplays).await?);
        Ok(())
    }
}
