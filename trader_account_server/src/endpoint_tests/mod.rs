mod accounts;
mod helpers;
mod mocks;
