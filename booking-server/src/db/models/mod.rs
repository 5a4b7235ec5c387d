//! Database Models
//!
//! Row structs (`sqlx::FromRow`) plus the Create/Update payloads the API
//! accepts for each table.

pub mod booking;
pub mod diving_service;
pub mod hotel;
pub mod package;
pub mod payment;
pub mod qr_code;
pub mod tour;
pub mod van_destination;
pub mod vehicle;

pub use booking::{
    Booking, BookingDetails, BookingStatus, BookingWrite, DivingBookingDetail, DivingBookingInput,
    VanRentalDetail, VanRentalInput, VehicleBookingDetail, VehicleBookingInput,
};
pub use diving_service::{DivingService, DivingServiceCreate, DivingServiceUpdate};
pub use hotel::{Hotel, HotelCreate, HotelUpdate};
pub use package::{Package, PackageCreate, PackageUpdate};
pub use payment::{Payment, PaymentUpdate};
pub use qr_code::{QrCode, QrCodeCreate, QrCodeUpdate};
pub use tour::{Tour, TourCreate, TourUpdate};
pub use van_destination::{VanDestination, VanDestinationCreate, VanDestinationUpdate};
pub use vehicle::{Vehicle, VehicleCreate, VehicleUpdate};
