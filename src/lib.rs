pub mod stun;
