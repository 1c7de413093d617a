// Axum API server consumed by the Stratum UI.
//
// Endpoints:
// - GET  /health — Liveness
// - GET  /api/protocol — Thresholds, reference price, chain, contract addresses
// - POST /api/ratio/preview — Prospective ratio, health and mint limits
// - POST /api/ratio/classify — Health state of a ratio
// - POST /api/ratio/decode — Render raw `getCollateralRatio` return data
// - POST /api/position/decode — Render raw `getPosition` return data
// - POST /api/position/project — Position after depositAndMint / burnAndWithdraw
// - POST /api/calldata/* — Call data for approve / depositAndMint / burnAndWithdraw
// - GET  /api/calldata/get-position/{user} — Call data for reading a position
// - GET  /api/calldata/collateral-ratio/{user} — Call data for reading the ratio
// - GET  /api/calldata/balance-of/{token}/{user} — Call data for an OIL/sUSD balance
// - POST /api/token/balance/decode — Render raw `balanceOf` return data

pub mod routes;
pub mod state;
