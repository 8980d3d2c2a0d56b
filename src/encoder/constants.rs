/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

pub const BINARY_BITS: u32 = 12;
pub const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

pub const FIRST_CODE_ADDRESS: u32 = 100;

pub const MIN_IMMEDIATE: i32 = -2048;
pub const MAX_IMMEDIATE: i32 = 2047;

// A/R/E codes.
pub const ARE_ABSOLUTE: u8 = 0b00;
pub const ARE_EXTERNAL: u8 = 0b01;
pub const ARE_RELOCATABLE: u8 = 0b10;
