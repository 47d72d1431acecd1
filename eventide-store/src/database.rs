use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::info;

use eventide_core::repository::{
    BookingRepository, EnrollmentRepository, HotelRepository, PaymentRepository, RoomRepository,
    TicketRepository,
};
use eventide_core::{
    BookingService, CapacityChecker, EligibilityChecker, HotelService, PaymentService,
    TicketService,
};

use crate::app_config::DatabaseConfig;
use crate::{
    PgBookingRepository, PgEnrollmentRepository, PgHotelRepository, PgPaymentRepository,
    PgRoomRepository, PgTicketRepository,
};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            enrollments: Arc::new(PgEnrollmentRepository::new(self.pool.clone())),
            tickets: Arc::new(PgTicketRepository::new(self.pool.clone())),
            rooms: Arc::new(PgRoomRepository::new(self.pool.clone())),
            bookings: Arc::new(PgBookingRepository::new(self.pool.clone())),
            hotels: Arc::new(PgHotelRepository::new(self.pool.clone())),
            payments: Arc::new(PgPaymentRepository::new(self.pool.clone())),
        }
    }
}

/// Postgres-backed collaborators, ready to be handed to the services.
#[derive(Clone)]
pub struct Repositories {
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub hotels: Arc<dyn HotelRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}

impl Repositories {
    pub fn booking_service(&self) -> BookingService {
        BookingService::new(
            EligibilityChecker::new(self.enrollments.clone(), self.tickets.clone()),
            CapacityChecker::new(self.rooms.clone(), self.bookings.clone()),
            self.bookings.clone(),
        )
    }

    pub fn hotel_service(&self) -> HotelService {
        HotelService::new(self.enrollments.clone(), self.tickets.clone(), self.hotels.clone())
    }

    pub fn ticket_service(&self) -> TicketService {
        TicketService::new(self.enrollments.clone(), self.tickets.clone())
    }

    pub fn payment_service(&self) -> PaymentService {
        PaymentService::new(self.enrollments.clone(), self.tickets.clone(), self.payments.clone())
    }
}
