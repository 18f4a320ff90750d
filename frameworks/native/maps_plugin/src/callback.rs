// Copyright (C) 2024 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Caller callbacks.
//!
//! Every request kind takes one callback. Multi-result kinds deliver one
//! [`Candidate`] per call and read the returned `bool` as a continuation
//! signal: `false` stops the delivery. Failures arrive as `Err` in a single
//! call. A canceled request never calls back.
//!
//! Any state the caller wants back in the callback is captured by the
//! callback itself. Closures of the matching signature implement every
//! callback trait.

use maps_utils::request_id::RequestId;

use crate::error::MapsError;
use crate::info::{Address, Coordinates, Place, Route};

/// One result of a multi-result reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<T> {
    /// Position of the result in the delivery, starting at 0.
    pub index: usize,
    /// Number of results the reply carries.
    pub total: usize,
    pub item: T,
}

pub trait GeocodeCallback: Send {
    /// Returns `false` to stop receiving candidates.
    fn on_coordinates(
        &mut self,
        request_id: RequestId,
        result: Result<Candidate<Coordinates>, MapsError>,
    ) -> bool;
}

impl<F> GeocodeCallback for F
where
    F: FnMut(RequestId, Result<Candidate<Coordinates>, MapsError>) -> bool + Send,
{
    fn on_coordinates(
        &mut self,
        request_id: RequestId,
        result: Result<Candidate<Coordinates>, MapsError>,
    ) -> bool {
        self(request_id, result)
    }
}

/// Receives the nearest address of a reverse geocoding.
pub trait ReverseGeocodeCallback: Send {
    fn on_address(&mut self, request_id: RequestId, result: Result<Address, MapsError>);
}

impl<F> ReverseGeocodeCallback for F
where
    F: FnMut(RequestId, Result<Address, MapsError>) + Send,
{
    fn on_address(&mut self, request_id: RequestId, result: Result<Address, MapsError>) {
        self(request_id, result)
    }
}

/// Receives the addresses of a batch reverse geocoding, in input order.
/// Positions that could not be resolved are empty addresses.
pub trait MultiReverseGeocodeCallback: Send {
    fn on_addresses(&mut self, request_id: RequestId, result: Result<Vec<Address>, MapsError>);
}

impl<F> MultiReverseGeocodeCallback for F
where
    F: FnMut(RequestId, Result<Vec<Address>, MapsError>) + Send,
{
    fn on_addresses(&mut self, request_id: RequestId, result: Result<Vec<Address>, MapsError>) {
        self(request_id, result)
    }
}

pub trait PlaceSearchCallback: Send {
    /// Returns `false` to stop receiving places.
    fn on_place(&mut self, request_id: RequestId, result: Result<Candidate<Place>, MapsError>)
        -> bool;
}

impl<F> PlaceSearchCallback for F
where
    F: FnMut(RequestId, Result<Candidate<Place>, MapsError>) -> bool + Send,
{
    fn on_place(
        &mut self,
        request_id: RequestId,
        result: Result<Candidate<Place>, MapsError>,
    ) -> bool {
        self(request_id, result)
    }
}

/// Receives every place of a search in one call.
pub trait PlaceListCallback: Send {
    fn on_places(&mut self, request_id: RequestId, result: Result<Vec<Place>, MapsError>);
}

impl<F> PlaceListCallback for F
where
    F: FnMut(RequestId, Result<Vec<Place>, MapsError>) + Send,
{
    fn on_places(&mut self, request_id: RequestId, result: Result<Vec<Place>, MapsError>) {
        self(request_id, result)
    }
}

pub trait PlaceDetailsCallback: Send {
    fn on_details(&mut self, request_id: RequestId, result: Result<Place, MapsError>);
}

impl<F> PlaceDetailsCallback for F
where
    F: FnMut(RequestId, Result<Place, MapsError>) + Send,
{
    fn on_details(&mut self, request_id: RequestId, result: Result<Place, MapsError>) {
        self(request_id, result)
    }
}

pub trait RouteCallback: Send {
    /// Returns `false` to stop receiving routes.
    fn on_route(&mut self, request_id: RequestId, result: Result<Candidate<Route>, MapsError>)
        -> bool;
}

impl<F> RouteCallback for F
where
    F: FnMut(RequestId, Result<Candidate<Route>, MapsError>) -> bool + Send,
{
    fn on_route(
        &mut self,
        request_id: RequestId,
        result: Result<Candidate<Route>, MapsError>,
    ) -> bool {
        self(request_id, result)
    }
}

/// How the results of a place search reach the caller.
pub enum PlaceDelivery {
    /// One call per place.
    PerItem(Box<dyn PlaceSearchCallback>),
    /// One call with the whole list.
    List(Box<dyn PlaceListCallback>),
}
