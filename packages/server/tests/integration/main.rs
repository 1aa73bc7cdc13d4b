mod admin;
mod health;
mod postgres;
